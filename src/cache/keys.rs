//! Cache key generation and management

use std::fmt;

/// A structured cache key that renders to the exact key strings stored
/// in the snapshot, so keys stay stable across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// League with its country and three most recent seasons included
    LeagueSeasons(u32),
    /// Full fixture list (with team/event/lineup includes) for a season
    FixturesBySeason(u32),
    /// Teams playing in a season
    TeamsBySeason(u32),
    /// Squad stats for one team in one season
    SquadBySeasonTeam { season_id: u32, team_id: u32 },
    /// League table for a season
    StandingsBySeason(u32),
    /// Topscorer list for a season
    TopscorersBySeason(u32),
    /// Debounce flag for the background refresh job
    RefreshGuard,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeagueSeasons(id) => write!(f, "StatsFilter_LeaguesAndSeasons_{}", id),
            Self::FixturesBySeason(id) => write!(f, "StatsFilter_ListFixtureBySeason_{}", id),
            Self::TeamsBySeason(id) => write!(f, "StatsFilter_ListTeams_{}", id),
            Self::SquadBySeasonTeam { season_id, team_id } => {
                write!(f, "StatsFilter_GetSquadBySeason_{}_Team_{}", season_id, team_id)
            }
            Self::StandingsBySeason(id) => write!(f, "StatsFilter_GetStandingsBySeason_{}", id),
            Self::TopscorersBySeason(id) => write!(f, "StatsFilter_GetTopscorerBySeason_{}", id),
            Self::RefreshGuard => write!(f, "background_refreshAllCompetitions"),
        }
    }
}
