//! TTL cache behavior: expiration, no-expiration entries, defensive
//! copies and key rendering.

use crate::cache::{CacheKey, CachePayload, Expiry, StatsCache};
use std::time::Duration;

fn cache() -> StatsCache {
    StatsCache::new(Duration::from_secs(3000))
}

#[tokio::test]
async fn test_set_then_get_returns_the_value() {
    let cache = cache();
    let key = CacheKey::StandingsBySeason(10);

    cache
        .set(&key, CachePayload::Flag(true), Expiry::After(Duration::from_secs(60)))
        .await;

    let payload = cache.get(&key).await.expect("entry should be present");
    assert_eq!(payload.as_flag(), Some(true));
}

#[tokio::test]
async fn test_entry_expires_after_its_ttl() {
    let cache = cache();
    let key = CacheKey::StandingsBySeason(10);

    cache
        .set(&key, CachePayload::Flag(true), Expiry::After(Duration::from_millis(40)))
        .await;
    tokio::time::sleep(Duration::from_millis(120)).await;

    // expired entries are a miss even before the sweep collects them
    assert!(cache.get(&key).await.is_none());
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_never_expiring_entry_outlives_short_ttls() {
    let cache = StatsCache::new(Duration::from_millis(20));
    let key = CacheKey::TopscorersBySeason(7);

    cache.set(&key, CachePayload::Flag(true), Expiry::Never).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(cache.get(&key).await.is_some());
    assert_eq!(cache.purge_expired().await, 0);
}

#[tokio::test]
async fn test_default_expiry_uses_the_cache_wide_ttl() {
    let cache = StatsCache::new(Duration::from_millis(40));
    let key = CacheKey::TeamsBySeason(3);

    cache.set(&key, CachePayload::Flag(true), Expiry::Default).await;
    assert!(cache.get(&key).await.is_some());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(cache.get(&key).await.is_none());
}

#[tokio::test]
async fn test_overwrite_replaces_value_and_expiry() {
    let cache = cache();
    let key = CacheKey::RefreshGuard;

    cache
        .set(&key, CachePayload::Flag(true), Expiry::After(Duration::from_millis(40)))
        .await;
    cache.set(&key, CachePayload::Flag(false), Expiry::Never).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    // the overwrite reset the clock; the entry carries the new value
    let payload = cache.get(&key).await.expect("overwritten entry survives");
    assert_eq!(payload.as_flag(), Some(false));
}

#[tokio::test]
async fn test_remove_reports_presence() {
    let cache = cache();
    let key = CacheKey::LeagueSeasons(8);

    cache.set(&key, CachePayload::Flag(true), Expiry::Never).await;
    assert!(cache.remove(&key).await);
    assert!(!cache.remove(&key).await);
    assert!(cache.get(&key).await.is_none());
}

#[tokio::test]
async fn test_type_mismatch_is_a_miss() {
    let cache = cache();
    let key = CacheKey::LeagueSeasons(8);

    // a flag stored where a league is expected must not come back as one
    cache.set(&key, CachePayload::Flag(true), Expiry::Never).await;
    let payload = cache.get(&key).await.expect("entry exists");
    assert!(payload.into_league().is_none());
}

#[tokio::test]
async fn test_items_excludes_expired_and_is_a_copy() {
    let cache = cache();
    let keep = CacheKey::LeagueSeasons(1);
    let stale = CacheKey::LeagueSeasons(2);

    cache.set(&keep, CachePayload::Flag(true), Expiry::Never).await;
    cache
        .set(&stale, CachePayload::Flag(true), Expiry::After(Duration::from_millis(30)))
        .await;
    tokio::time::sleep(Duration::from_millis(80)).await;

    let mut items = cache.items().await;
    assert_eq!(items.len(), 1);
    assert!(items.contains_key(&keep.to_string()));

    // mutating the snapshot must not touch the live cache
    items.clear();
    assert!(cache.get(&keep).await.is_some());
}

#[tokio::test]
async fn test_purge_expired_reports_and_shrinks() {
    let cache = cache();
    cache
        .set(&CacheKey::TeamsBySeason(1), CachePayload::Flag(true), Expiry::Never)
        .await;
    cache
        .set(
            &CacheKey::TeamsBySeason(2),
            CachePayload::Flag(true),
            Expiry::After(Duration::from_millis(30)),
        )
        .await;
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(cache.purge_expired().await, 1);
    assert_eq!(cache.len().await, 1);
}

#[test]
fn test_key_rendering_matches_stored_snapshots() {
    // these exact strings live in persisted snapshots; renaming a
    // variant must not change them
    assert_eq!(
        CacheKey::LeagueSeasons(8).to_string(),
        "StatsFilter_LeaguesAndSeasons_8"
    );
    assert_eq!(
        CacheKey::FixturesBySeason(892).to_string(),
        "StatsFilter_ListFixtureBySeason_892"
    );
    assert_eq!(CacheKey::TeamsBySeason(892).to_string(), "StatsFilter_ListTeams_892");
    assert_eq!(
        CacheKey::SquadBySeasonTeam { season_id: 892, team_id: 9 }.to_string(),
        "StatsFilter_GetSquadBySeason_892_Team_9"
    );
    assert_eq!(
        CacheKey::StandingsBySeason(892).to_string(),
        "StatsFilter_GetStandingsBySeason_892"
    );
    assert_eq!(
        CacheKey::TopscorersBySeason(892).to_string(),
        "StatsFilter_GetTopscorerBySeason_892"
    );
    assert_eq!(CacheKey::RefreshGuard.to_string(), "background_refreshAllCompetitions");
}
