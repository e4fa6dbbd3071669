// Manual harness: runs a single refresh cycle against the live upstream
// API and prints what ended up in the cache. Needs SPORTS_API_TOKEN set.

use sports_stats_cache::{cache, config::Config, db::connection::SnapshotStore, refresh, state::AppState, SportsClient};

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    if config.sports_api_token.is_empty() {
        eprintln!("SPORTS_API_TOKEN is not set; the upstream will reject every call");
    }

    let store = SnapshotStore::new(&config.snapshot_db_url, config.store_working_set_bytes);
    let stats_cache = Arc::new(cache::persist::restore(&store, config.cache_default_ttl).await);
    println!("restored cache entries: {}", stats_cache.len().await);

    let client = Arc::new(SportsClient::new(&config)?);
    let state = Arc::new(AppState {
        config,
        cache: stats_cache.clone(),
        store,
    });

    refresh::run_refresh_cycle(state.clone(), client).await;

    let items = state.cache.items().await;
    println!("cache entries after refresh: {}", items.len());
    let mut keys: Vec<_> = items.keys().collect();
    keys.sort();
    for key in keys {
        println!("  {}", key);
    }

    Ok(())
}
