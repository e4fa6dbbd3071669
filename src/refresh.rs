//! Background refresh scheduler
//!
//! Pre-warms the fixtures cache for every tracked competition's current
//! season on a fixed cadence, independent of foreground traffic. A
//! guard entry in the cache debounces overlapping cycles: the guard is
//! set (and persisted) BEFORE the expensive work starts, so a slow cycle
//! never leaves a window where a second tick also starts refreshing.

use crate::cache::{persist, CacheKey, CachePayload, Expiry};
use crate::sportsapi::client::SportsProvider;
use crate::state::AppState;
use crate::stats::StatsApi;
use std::sync::Arc;
use tokio::time::{interval, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Run the scheduler until the token is cancelled. Each tick body runs
/// in its own supervised task, so one panicking cycle is logged and the
/// next tick still fires.
pub async fn start_refresh<C: SportsProvider>(
    state: Arc<AppState>,
    client: Arc<C>,
    shutdown: CancellationToken,
) {
    info!(
        "starting background refresh scheduler (every {:?})",
        state.config.refresh_interval
    );

    let mut ticker = interval(state.config.refresh_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let tick_state = state.clone();
                let tick_client = client.clone();
                match tokio::spawn(run_refresh_cycle(tick_state, tick_client)).await {
                    Ok(()) => {}
                    Err(e) if e.is_panic() => {
                        error!("refresh cycle panicked, next tick will retry: {}", e);
                    }
                    Err(e) => {
                        warn!("refresh cycle aborted: {}", e);
                    }
                }
            }
            _ = shutdown.cancelled() => {
                info!("shutting down refresh scheduler");
                break;
            }
        }
    }
}

/// One refresh cycle: skip when the guard is fresh, otherwise set it,
/// then sequentially re-fetch fixtures for every tracked competition's
/// current season with an inter-request sleep (rate-limit courtesy to
/// the upstream).
pub async fn run_refresh_cycle<C: SportsProvider>(state: Arc<AppState>, client: Arc<C>) {
    let guard_key = CacheKey::RefreshGuard;

    if state.cache.get(&guard_key).await.is_some() {
        info!("refresh guard still fresh, skipping this tick");
        return;
    }
    info!("refresh guard absent, refreshing all competitions");

    // the guard goes up before the expensive work starts
    state
        .cache
        .set(
            &guard_key,
            CachePayload::Flag(true),
            Expiry::After(state.config.refresh_guard_ttl),
        )
        .await;
    if let Err(e) = persist::persist(&state.cache, &state.store).await {
        warn!("persisting refresh guard failed: {}", e);
    }

    let mut api = StatsApi::new(state.clone(), client);
    api.rebuild_cache = true;
    api.skip_persist = true;

    let competitions = api.list_competitions().await;
    let seasons: Vec<u32> = competitions
        .iter()
        .map(|league| league.current_season_id)
        .filter(|id| *id != 0)
        .collect();

    for (i, season_id) in seasons.iter().enumerate() {
        let fixtures = api.list_fixtures_by_season(*season_id).await;
        info!(
            "refreshed fixtures for season {}: {} fixtures ({}/{})",
            season_id,
            fixtures.len(),
            i + 1,
            seasons.len()
        );
        sleep(state.config.refresh_throttle).await;
    }

    if let Err(e) = persist::persist(&state.cache, &state.store).await {
        warn!("persisting refreshed cache failed: {}", e);
    }
    info!("refresh cycle complete: {} seasons", seasons.len());
}
