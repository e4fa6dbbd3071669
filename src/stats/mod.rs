//! Cache-aside accessor layer
//!
//! One function per entity/query shape, all following the same pattern:
//! check the cache under a deterministic key, fall through to the
//! upstream client on a miss, store the result without expiration, then
//! persist the snapshot. Upstream failures are absorbed here — callers
//! see an empty collection, never an error, and a failed refresh leaves
//! whatever was already cached untouched.

pub mod calendar;

pub use calendar::{StatsCalendar, StatsCalendarEntry};

use crate::cache::{persist, CacheKey, CachePayload, Expiry};
use crate::sportsapi::client::SportsProvider;
use crate::sportsapi::models::{
    Fixture, FixtureEvent, League, SquadPlayer, Standing, Team, Topscorer,
};
use crate::sportsapi::options::ListOptions;
use crate::state::AppState;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const LEAGUE_SEASONS_INCLUDE: &str = "country,seasons:limit(3|1):order(id|desc)";
pub const SEASON_FIXTURES_INCLUDE: &str =
    "fixtures.localTeam,fixtures.visitorTeam,fixtures.events,fixtures.lineup";
pub const TEAMS_ORDER_INCLUDE: &str = "order(name|asc)";

/// A tracked football competition with its fixed upstream ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competition {
    pub name: &'static str,
    pub id: u32,
}

/// The fixed universe of competitions the storefront tracks.
pub const COMPETITIONS: &[Competition] = &[
    Competition { name: "Worldcup2018", id: 732 },
    Competition { name: "UAE - UAE League", id: 959 },
    Competition { name: "UAE - Division 1", id: 962 },
    Competition { name: "UAE - Arabian Gulf Cup", id: 965 },
    Competition { name: "KSA - Pro League", id: 944 },
    Competition { name: "KSA - Division 1", id: 947 },
    Competition { name: "KSA - Kings Cup", id: 950 },
    Competition { name: "ESP - La Liga", id: 564 },
    Competition { name: "ITA - Serie A", id: 384 },
    Competition { name: "FRA - Ligue 1", id: 301 },
    Competition { name: "GBR - Premier League", id: 8 },
];

/// Season selection entry for template-facing season pickers.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonOption {
    pub name: String,
    pub id: u32,
    pub href: String,
}

/// A single fixture with its events grouped per type for each side.
#[derive(Debug, Clone, Default)]
pub struct FixtureAndEvents {
    pub fixture: Option<Fixture>,
    pub local_team_events: HashMap<String, Vec<FixtureEvent>>,
    pub visitor_team_events: HashMap<String, Vec<FixtureEvent>>,
}

pub struct StatsApi<C: SportsProvider> {
    state: Arc<AppState>,
    client: Arc<C>,
    /// Skip cache reads and always refetch (used by the refresh job)
    pub rebuild_cache: bool,
    /// Suppress the per-call snapshot persist (caller persists once)
    pub skip_persist: bool,
}

impl<C: SportsProvider> StatsApi<C> {
    pub fn new(state: Arc<AppState>, client: Arc<C>) -> Self {
        Self {
            state,
            client,
            rebuild_cache: false,
            skip_persist: false,
        }
    }

    async fn cached(&self, key: &CacheKey) -> Option<CachePayload> {
        if self.rebuild_cache {
            return None;
        }
        self.state.cache.get(key).await
    }

    async fn store(&self, key: &CacheKey, payload: CachePayload) {
        self.state.cache.set(key, payload, Expiry::Never).await;
        if self.skip_persist {
            return;
        }
        if let Err(e) = persist::persist(&self.state.cache, &self.state.store).await {
            warn!("cache snapshot persist failed: {}", e);
        }
    }

    /// League by ID, with country and the three most recent seasons
    /// (newest first) included.
    pub async fn get_league(&self, league_id: u32) -> League {
        let key = CacheKey::LeagueSeasons(league_id);
        debug!("accessor cache key: {}", key);
        if let Some(payload) = self.cached(&key).await {
            if let Some(league) = payload.into_league() {
                return league;
            }
        }

        let opt = ListOptions::with_include(LEAGUE_SEASONS_INCLUDE);
        let league = match self.client.get_league(league_id, &opt).await {
            Ok(league) => league,
            Err(e) => {
                warn!("get_league({}) upstream query failed: {}", league_id, e);
                return League::default();
            }
        };

        self.store(&key, CachePayload::League(league.clone())).await;
        league
    }

    /// Season picker entries for a competition, derived from the cached
    /// league's seasons include.
    pub async fn list_seasons(&self, competition_id: u32) -> Vec<SeasonOption> {
        if competition_id == 0 {
            return Vec::new();
        }

        let league = self.get_league(competition_id).await;
        league
            .seasons
            .data
            .iter()
            .map(|s| SeasonOption {
                name: s.name.clone(),
                id: s.id,
                href: format!("/stats/league/{}/season/{}/", competition_id, s.id),
            })
            .collect()
    }

    /// Teams playing in a season, ordered by name upstream.
    pub async fn list_teams(&self, season_id: u32) -> Vec<Team> {
        let key = CacheKey::TeamsBySeason(season_id);
        debug!("accessor cache key: {}", key);
        if let Some(payload) = self.cached(&key).await {
            if let Some(teams) = payload.into_teams() {
                debug!("{} cached result count: {}", key, teams.len());
                return teams;
            }
        }

        let opt = ListOptions::with_include(TEAMS_ORDER_INCLUDE);
        let teams = match self.client.list_teams(season_id, &opt).await {
            Ok(teams) => teams,
            Err(e) => {
                warn!("list_teams({}) upstream query failed: {}", season_id, e);
                return Vec::new();
            }
        };
        if teams.is_empty() {
            debug!("{} upstream returned no teams", key);
        }

        self.store(&key, CachePayload::Teams(teams.clone())).await;
        teams
    }

    /// Full fixture list for a season with team/event/lineup includes.
    /// The heaviest upstream call; the refresh job pre-warms it.
    pub async fn list_fixtures_by_season(&self, season_id: u32) -> Vec<Fixture> {
        let key = CacheKey::FixturesBySeason(season_id);
        debug!("accessor cache key: {}", key);
        if let Some(payload) = self.cached(&key).await {
            if let Some(fixtures) = payload.into_fixtures() {
                return fixtures;
            }
        }

        let opt = ListOptions::with_include(SEASON_FIXTURES_INCLUDE);
        let season = match self.client.get_season(season_id, &opt).await {
            Ok(season) => season,
            Err(e) => {
                warn!("list_fixtures_by_season({}) upstream query failed: {}", season_id, e);
                return Vec::new();
            }
        };
        let fixtures = season.fixtures.data;

        self.store(&key, CachePayload::Fixtures(fixtures.clone())).await;
        fixtures
    }

    /// Fixtures on a given calendar day, optionally restricted to those
    /// involving one team on either side. Recomputed from the cached
    /// fixture list; no cache key of its own.
    pub async fn list_fixtures_by_date(
        &self,
        season_id: u32,
        filter_date: DateTime<FixedOffset>,
        team_id: Option<u32>,
    ) -> Vec<Fixture> {
        let filter_day = filter_date.date_naive();

        self.list_fixtures_by_season(season_id)
            .await
            .into_iter()
            .filter(|f| {
                if let Some(team_id) = team_id {
                    if f.localteam_id != team_id && f.visitorteam_id != team_id {
                        return false;
                    }
                }
                f.start_time().date_naive() == filter_day
            })
            .collect()
    }

    /// One fixture out of the cached season list, with its events split
    /// per side and grouped by event type.
    pub async fn get_fixture(&self, season_id: u32, fixture_id: u32) -> FixtureAndEvents {
        let mut result = FixtureAndEvents::default();

        let fixtures = self.list_fixtures_by_season(season_id).await;
        if fixtures.is_empty() {
            warn!("get_fixture: no fixtures returned for season {}", season_id);
            return result;
        }

        let Some(fixture) = fixtures.into_iter().find(|f| f.id == fixture_id) else {
            warn!("get_fixture: fixture {} not in season {}", fixture_id, season_id);
            return result;
        };

        for event in &fixture.events.data {
            // the upstream sends event team IDs as strings
            let team_id: u32 = match event.team_id.parse() {
                Ok(id) => id,
                Err(e) => {
                    warn!("get_fixture: unparsable event team_id {:?}: {}", event.team_id, e);
                    continue;
                }
            };
            let events = if team_id == fixture.localteam_id {
                &mut result.local_team_events
            } else {
                &mut result.visitor_team_events
            };
            events.entry(event.kind.clone()).or_default().push(event.clone());
        }

        result.fixture = Some(fixture);
        result
    }

    /// League table for a season.
    pub async fn get_standings(&self, season_id: u32) -> Vec<Standing> {
        let key = CacheKey::StandingsBySeason(season_id);
        debug!("accessor cache key: {}", key);
        if let Some(payload) = self.cached(&key).await {
            if let Some(standings) = payload.into_standings() {
                return standings;
            }
        }

        let standings = match self.client.list_standings(season_id, &ListOptions::default()).await {
            Ok(standings) => standings,
            Err(e) => {
                warn!("get_standings({}) upstream query failed: {}", season_id, e);
                return Vec::new();
            }
        };

        self.store(&key, CachePayload::Standings(standings.clone())).await;
        standings
    }

    /// Topscorer list for a season.
    pub async fn get_topscorers(&self, season_id: u32) -> Vec<Topscorer> {
        let key = CacheKey::TopscorersBySeason(season_id);
        debug!("accessor cache key: {}", key);
        if let Some(payload) = self.cached(&key).await {
            if let Some(topscorers) = payload.into_topscorers() {
                return topscorers;
            }
        }

        let topscorers = match self
            .client
            .list_topscorers(season_id, &ListOptions::default())
            .await
        {
            Ok(topscorers) => topscorers,
            Err(e) => {
                warn!("get_topscorers({}) upstream query failed: {}", season_id, e);
                return Vec::new();
            }
        };

        self.store(&key, CachePayload::Topscorers(topscorers.clone())).await;
        topscorers
    }

    /// Squad stats for one team in one season.
    pub async fn get_squad(&self, season_id: u32, team_id: u32) -> Vec<SquadPlayer> {
        let key = CacheKey::SquadBySeasonTeam { season_id, team_id };
        debug!("accessor cache key: {}", key);
        if let Some(payload) = self.cached(&key).await {
            if let Some(squad) = payload.into_squad() {
                return squad;
            }
        }

        let squad = match self
            .client
            .list_squad(season_id, team_id, &ListOptions::default())
            .await
        {
            Ok(squad) => squad,
            Err(e) => {
                warn!("get_squad({}, {}) upstream query failed: {}", season_id, team_id, e);
                return Vec::new();
            }
        };

        self.store(&key, CachePayload::Squad(squad.clone())).await;
        squad
    }

    /// Squad stats keyed by player ID, for per-player lookups.
    pub async fn get_squad_map(&self, season_id: u32, team_id: u32) -> HashMap<u32, SquadPlayer> {
        self.get_squad(season_id, team_id)
            .await
            .into_iter()
            .map(|p| (p.player_id, p))
            .collect()
    }

    /// Every tracked competition's league entry.
    pub async fn list_competitions(&self) -> Vec<League> {
        let mut leagues = Vec::with_capacity(COMPETITIONS.len());
        for comp in COMPETITIONS {
            leagues.push(self.get_league(comp.id).await);
        }
        leagues
    }

    /// The static competition table, for pickers that don't need league
    /// data.
    pub fn list_competitions_simple(&self) -> &'static [Competition] {
        COMPETITIONS
    }

    /// Deduplicated-by-day calendar of a season's fixture days.
    pub async fn get_stats_calendar(
        &self,
        season_id: u32,
        date_param: Option<String>,
        team_ids: &[u32],
    ) -> StatsCalendar {
        let fixtures = self.list_fixtures_by_season(season_id).await;
        calendar::build_calendar(
            fixtures,
            date_param,
            calendar::CalendarWalk {
                team_ids,
                synthesize_today: false,
            },
            Utc::now().with_timezone(&crate::sportsapi::models::display_offset()),
        )
    }

    /// Calendar over the union of every tracked competition's current
    /// season. Splices in a synthetic "today" entry when today falls
    /// between match days.
    pub async fn get_stats_calendar_all(&self, date_param: Option<String>) -> StatsCalendar {
        let mut fixtures = Vec::new();
        for league in self.list_competitions().await {
            if league.current_season_id == 0 {
                continue;
            }
            fixtures.extend(self.list_fixtures_by_season(league.current_season_id).await);
        }

        calendar::build_calendar(
            fixtures,
            date_param,
            calendar::CalendarWalk {
                team_ids: &[],
                synthesize_today: true,
            },
            Utc::now().with_timezone(&crate::sportsapi::models::display_offset()),
        )
    }
}
