//! Shared test fixtures: a fake upstream provider and a tempfile-backed
//! snapshot store.

use crate::cache::StatsCache;
use crate::config::Config;
use crate::db::connection::SnapshotStore;
use crate::sportsapi::client::{ClientError, SportsProvider};
use crate::sportsapi::models::{
    Fixture, Include, League, Season, SquadPlayer, Standing, Team, Topscorer,
};
use crate::sportsapi::options::ListOptions;
use crate::state::AppState;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub fn test_config(snapshot_db_url: &str) -> Config {
    Config {
        sports_api_base_url: "https://soccer.example.test/api".to_string(),
        sports_api_token: "test-token".to_string(),
        snapshot_db_url: snapshot_db_url.to_string(),
        store_working_set_bytes: 4 * 1024 * 1024,
        cache_default_ttl: Duration::from_secs(3000),
        cache_cleanup_interval: Duration::from_secs(600),
        refresh_interval: Duration::from_secs(600),
        refresh_guard_ttl: Duration::from_secs(3600),
        // no inter-request sleeps in tests
        refresh_throttle: Duration::ZERO,
        connect_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(10),
    }
}

/// Fresh state wired to a snapshot database in a temp directory. The
/// `TempDir` must stay alive for as long as the state is used.
pub fn test_state(guard_ttl: Duration) -> (Arc<AppState>, TempDir) {
    let dir = TempDir::new().expect("create tempdir");
    let db_url = format!("sqlite:{}", dir.path().join("snapshot.db").display());

    let mut config = test_config(&db_url);
    config.refresh_guard_ttl = guard_ttl;

    let store = SnapshotStore::new(&config.snapshot_db_url, config.store_working_set_bytes);
    let cache = Arc::new(StatsCache::new(config.cache_default_ttl));
    let state = Arc::new(AppState { config, cache, store });
    (state, dir)
}

/// The fixed display timezone, UTC+4.
pub fn dubai() -> FixedOffset {
    crate::sportsapi::models::display_offset()
}

pub fn day(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    dubai()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

pub fn fixture_at(
    id: u32,
    season_id: u32,
    localteam_id: u32,
    visitorteam_id: u32,
    start: DateTime<FixedOffset>,
) -> Fixture {
    let mut fixture = Fixture {
        id,
        season_id,
        localteam_id,
        visitorteam_id,
        ..Fixture::default()
    };
    fixture.time.starting_at.timestamp = start.timestamp();
    fixture.time.starting_at.date_time =
        start.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    fixture
}

pub fn league_with_season(id: u32, current_season_id: u32) -> League {
    League {
        id,
        name: format!("League {}", id),
        current_season_id,
        seasons: Include {
            data: vec![Season {
                id: current_season_id,
                name: "2026".to_string(),
                league_id: id,
                is_current_season: true,
                ..Season::default()
            }],
        },
        ..League::default()
    }
}

pub fn season_with_fixtures(id: u32, fixtures: Vec<Fixture>) -> Season {
    Season {
        id,
        name: "2026".to_string(),
        is_current_season: true,
        fixtures: Include { data: fixtures },
        ..Season::default()
    }
}

/// In-memory stand-in for the upstream API. Lookups miss with a 404,
/// IDs listed in the `fail_*` sets answer with a 500, and every call
/// bumps a shared counter so tests can assert how often the upstream
/// was actually consulted.
#[derive(Default)]
pub struct FakeSports {
    pub leagues: HashMap<u32, League>,
    pub seasons: HashMap<u32, Season>,
    pub teams: HashMap<u32, Vec<Team>>,
    pub standings: HashMap<u32, Vec<Standing>>,
    pub topscorers: HashMap<u32, Vec<Topscorer>>,
    pub squads: HashMap<(u32, u32), Vec<SquadPlayer>>,
    pub fail_seasons: HashSet<u32>,
    pub fail_standings: HashSet<u32>,
    pub calls: AtomicUsize,
}

impl FakeSports {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn not_found(endpoint: &str) -> ClientError {
        ClientError::Status {
            status: 404,
            url: endpoint.to_string(),
        }
    }

    fn unavailable(endpoint: &str) -> ClientError {
        ClientError::Status {
            status: 500,
            url: endpoint.to_string(),
        }
    }
}

impl SportsProvider for FakeSports {
    async fn get_league(&self, league_id: u32, _opt: &ListOptions) -> Result<League, ClientError> {
        self.hit();
        self.leagues
            .get(&league_id)
            .cloned()
            .ok_or_else(|| Self::not_found("leagues"))
    }

    async fn get_season(&self, season_id: u32, _opt: &ListOptions) -> Result<Season, ClientError> {
        self.hit();
        if self.fail_seasons.contains(&season_id) {
            return Err(Self::unavailable("seasons"));
        }
        self.seasons
            .get(&season_id)
            .cloned()
            .ok_or_else(|| Self::not_found("seasons"))
    }

    async fn list_teams(&self, season_id: u32, _opt: &ListOptions) -> Result<Vec<Team>, ClientError> {
        self.hit();
        self.teams
            .get(&season_id)
            .cloned()
            .ok_or_else(|| Self::not_found("teams"))
    }

    async fn list_standings(
        &self,
        season_id: u32,
        _opt: &ListOptions,
    ) -> Result<Vec<Standing>, ClientError> {
        self.hit();
        if self.fail_standings.contains(&season_id) {
            return Err(Self::unavailable("standings"));
        }
        self.standings
            .get(&season_id)
            .cloned()
            .ok_or_else(|| Self::not_found("standings"))
    }

    async fn list_topscorers(
        &self,
        season_id: u32,
        _opt: &ListOptions,
    ) -> Result<Vec<Topscorer>, ClientError> {
        self.hit();
        self.topscorers
            .get(&season_id)
            .cloned()
            .ok_or_else(|| Self::not_found("topscorers"))
    }

    async fn list_squad(
        &self,
        season_id: u32,
        team_id: u32,
        _opt: &ListOptions,
    ) -> Result<Vec<SquadPlayer>, ClientError> {
        self.hit();
        self.squads
            .get(&(season_id, team_id))
            .cloned()
            .ok_or_else(|| Self::not_found("squad"))
    }

    async fn list_livescores(&self, _opt: &ListOptions) -> Result<Vec<Fixture>, ClientError> {
        self.hit();
        Ok(Vec::new())
    }

    async fn list_livescores_now(&self, _opt: &ListOptions) -> Result<Vec<Fixture>, ClientError> {
        self.hit();
        Ok(Vec::new())
    }
}
