//! Background refresh: cache warming, the debounce guard and tolerance
//! of a dead upstream.

use crate::cache::persist;
use crate::cache::CacheKey;
use crate::refresh::run_refresh_cycle;
use crate::stats::COMPETITIONS;
use crate::tests::support::{self, FakeSports};
use std::sync::Arc;
use std::time::Duration;

/// Fake upstream with every tracked competition present: league N has
/// current season N*10 carrying one fixture.
fn seeded_upstream() -> Arc<FakeSports> {
    let mut fake = FakeSports::default();
    for comp in COMPETITIONS {
        let season_id = comp.id * 10;
        fake.leagues.insert(comp.id, support::league_with_season(comp.id, season_id));
        fake.seasons.insert(
            season_id,
            support::season_with_fixtures(
                season_id,
                vec![support::fixture_at(comp.id, season_id, 1, 2, support::day(2026, 3, 14, 18, 0))],
            ),
        );
    }
    Arc::new(fake)
}

#[tokio::test]
async fn test_cycle_warms_leagues_fixtures_and_sets_the_guard() {
    let (state, _dir) = support::test_state(Duration::from_secs(3600));
    let fake = seeded_upstream();

    run_refresh_cycle(state.clone(), fake.clone()).await;

    // one league probe plus one season fetch per tracked competition
    assert_eq!(fake.call_count(), COMPETITIONS.len() * 2);

    let items = state.cache.items().await;
    assert!(items.contains_key("background_refreshAllCompetitions"));
    for comp in COMPETITIONS {
        assert!(items.contains_key(&CacheKey::LeagueSeasons(comp.id).to_string()));
        assert!(items.contains_key(&CacheKey::FixturesBySeason(comp.id * 10).to_string()));
    }

    // guard + one league and one fixture entry per competition
    assert_eq!(items.len(), COMPETITIONS.len() * 2 + 1);
}

#[tokio::test]
async fn test_fresh_guard_debounces_the_next_cycle() {
    let (state, _dir) = support::test_state(Duration::from_secs(3600));
    let fake = seeded_upstream();

    run_refresh_cycle(state.clone(), fake.clone()).await;
    let first_pass = fake.call_count();

    run_refresh_cycle(state.clone(), fake.clone()).await;
    assert_eq!(fake.call_count(), first_pass);
}

#[tokio::test]
async fn test_expired_guard_admits_the_next_cycle() {
    let (state, _dir) = support::test_state(Duration::from_millis(250));
    let fake = seeded_upstream();

    run_refresh_cycle(state.clone(), fake.clone()).await;
    let first_pass = fake.call_count();

    tokio::time::sleep(Duration::from_millis(500)).await;
    run_refresh_cycle(state.clone(), fake.clone()).await;

    assert_eq!(fake.call_count(), first_pass * 2);
}

#[tokio::test]
async fn test_cycle_persists_the_warmed_cache() {
    let (state, _dir) = support::test_state(Duration::from_secs(3600));
    let fake = seeded_upstream();

    run_refresh_cycle(state.clone(), fake).await;

    let restored = persist::restore(&state.store, state.config.cache_default_ttl).await;
    let items = restored.items().await;
    assert_eq!(items.len(), COMPETITIONS.len() * 2 + 1);
    assert!(items.contains_key("background_refreshAllCompetitions"));
}

#[tokio::test]
async fn test_cycle_survives_a_dead_upstream() {
    let (state, _dir) = support::test_state(Duration::from_secs(3600));
    let fake = Arc::new(FakeSports::default());

    run_refresh_cycle(state.clone(), fake.clone()).await;

    // every league probe missed, so no season was worth fetching
    assert_eq!(fake.call_count(), COMPETITIONS.len());

    // only the guard made it into the cache
    let items = state.cache.items().await;
    assert_eq!(items.len(), 1);
    assert!(items.contains_key("background_refreshAllCompetitions"));
}
