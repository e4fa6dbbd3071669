// Initialize configuration and logging
// Restore the cache from the disk snapshot
// Start the cleanup sweep and the background refresh scheduler
// Flush the cache to disk on shutdown

use sports_stats_cache::{cache, config::Config, db::connection::SnapshotStore, refresh, state::AppState, SportsClient};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting sports-stats-cache");

    // Load configuration
    let config = Config::from_env();
    info!("configuration loaded: {:?}", config);

    // Restore the cache from the persisted snapshot (empty on first boot)
    let store = SnapshotStore::new(&config.snapshot_db_url, config.store_working_set_bytes);
    let stats_cache = Arc::new(cache::persist::restore(&store, config.cache_default_ttl).await);
    info!("cache ready with {} entries", stats_cache.len().await);

    let client = Arc::new(SportsClient::new(&config)?);

    // Create shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        cache: stats_cache.clone(),
        store,
    });

    let shutdown = CancellationToken::new();

    // Start the passive cleanup sweep
    let cleanup_handle = stats_cache.spawn_cleanup(config.cache_cleanup_interval, shutdown.clone());

    // Start the background refresh scheduler
    let refresh_handle = tokio::spawn(refresh::start_refresh(
        state.clone(),
        client,
        shutdown.clone(),
    ));
    info!("background refresh task started");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    shutdown.cancel();

    let _ = refresh_handle.await;
    let _ = cleanup_handle.await;

    // flush pending cache state before exit
    if let Err(e) = cache::persist::persist(&state.cache, &state.store).await {
        warn!("final cache persist failed: {}", e);
    }

    Ok(())
}
