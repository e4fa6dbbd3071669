//! Typed cache payloads
//!
//! Every value that can live in the cache is one variant of a tagged
//! enum, so the snapshot codec knows every concrete shape up front and a
//! decoded entry always comes back type-faithful. A mismatch between the
//! key a caller used and the variant stored under it is a programming
//! error; the extraction helpers log it loudly and report a miss instead
//! of handing back the wrong type.

use crate::sportsapi::models::{Fixture, League, SquadPlayer, Standing, Team, Topscorer};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CachePayload {
    League(League),
    Fixtures(Vec<Fixture>),
    Teams(Vec<Team>),
    Topscorers(Vec<Topscorer>),
    Standings(Vec<Standing>),
    Squad(Vec<SquadPlayer>),
    Flag(bool),
}

impl CachePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::League(_) => "League",
            Self::Fixtures(_) => "Fixtures",
            Self::Teams(_) => "Teams",
            Self::Topscorers(_) => "Topscorers",
            Self::Standings(_) => "Standings",
            Self::Squad(_) => "Squad",
            Self::Flag(_) => "Flag",
        }
    }

    pub fn into_league(self) -> Option<League> {
        match self {
            Self::League(league) => Some(league),
            other => {
                warn!("cache payload type mismatch: expected League, found {}", other.kind());
                None
            }
        }
    }

    pub fn into_fixtures(self) -> Option<Vec<Fixture>> {
        match self {
            Self::Fixtures(fixtures) => Some(fixtures),
            other => {
                warn!("cache payload type mismatch: expected Fixtures, found {}", other.kind());
                None
            }
        }
    }

    pub fn into_teams(self) -> Option<Vec<Team>> {
        match self {
            Self::Teams(teams) => Some(teams),
            other => {
                warn!("cache payload type mismatch: expected Teams, found {}", other.kind());
                None
            }
        }
    }

    pub fn into_topscorers(self) -> Option<Vec<Topscorer>> {
        match self {
            Self::Topscorers(topscorers) => Some(topscorers),
            other => {
                warn!("cache payload type mismatch: expected Topscorers, found {}", other.kind());
                None
            }
        }
    }

    pub fn into_standings(self) -> Option<Vec<Standing>> {
        match self {
            Self::Standings(standings) => Some(standings),
            other => {
                warn!("cache payload type mismatch: expected Standings, found {}", other.kind());
                None
            }
        }
    }

    pub fn into_squad(self) -> Option<Vec<SquadPlayer>> {
        match self {
            Self::Squad(squad) => Some(squad),
            other => {
                warn!("cache payload type mismatch: expected Squad, found {}", other.kind());
                None
            }
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            other => {
                warn!("cache payload type mismatch: expected Flag, found {}", other.kind());
                None
            }
        }
    }
}
