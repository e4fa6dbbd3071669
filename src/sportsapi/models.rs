//! Upstream API payload models
//!
//! Every response body arrives wrapped in a `{"data": ...}` envelope, and
//! eagerly-expanded relations ("includes") are wrapped one level deeper,
//! e.g. `{"data": {"seasons": {"data": [...]}}}`. The `Include` wrapper
//! mirrors that shape so the structs deserialize straight off the wire.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fixed display timezone for fixture dates (UTC+4, Dubai).
pub fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(4 * 3600).expect("UTC+4 is a valid offset")
}

/// One level of the nested include envelope: `{"data": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
pub struct Include<T> {
    #[serde(default)]
    pub data: T,
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct League {
    pub id: u32,
    pub country_id: u32,
    pub name: String,
    pub is_cup: bool,
    pub current_season_id: u32,
    pub current_round_id: Option<u32>,
    pub current_stage_id: Option<u32>,
    pub logo_path: Option<String>,
    pub country: Option<Include<Country>>,
    pub seasons: Include<Vec<Season>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub id: u32,
    pub name: String,
    pub league_id: u32,
    pub is_current_season: bool,
    pub current_round_id: Option<u32>,
    pub current_stage_id: Option<u32>,
    pub fixtures: Include<Vec<Fixture>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: u32,
    pub legacy_id: Option<u32>,
    pub country_id: u32,
    pub name: String,
    pub short_code: Option<String>,
    pub national_team: bool,
    pub founded: Option<u32>,
    pub logo_path: Option<String>,
    pub venue_id: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureScores {
    pub localteam_score: u32,
    pub visitorteam_score: u32,
    pub ht_score: Option<String>,
    pub ft_score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureStart {
    pub date_time: String,
    pub date: String,
    pub time: String,
    pub timestamp: i64,
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureTime {
    pub status: String,
    pub starting_at: FixtureStart,
    pub minute: Option<u32>,
    pub added_time: Option<u32>,
    pub extra_minute: Option<u32>,
    pub injury_time: Option<u32>,
}

/// A match event (goal, card, substitution, ...). The upstream sends
/// `team_id` as a string on this shape only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureEvent {
    pub id: u64,
    pub team_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub player_id: Option<u32>,
    pub player_name: Option<String>,
    pub related_player_id: Option<u32>,
    pub related_player_name: Option<String>,
    pub minute: Option<u32>,
    pub extra_minute: Option<u32>,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturePlayer {
    pub team_id: u32,
    pub fixture_id: u32,
    pub player_id: u32,
    pub player_name: Option<String>,
    pub number: Option<u32>,
    pub position: Option<String>,
    pub formation_position: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub id: u32,
    pub league_id: u32,
    pub season_id: u32,
    pub stage_id: Option<u32>,
    pub round_id: Option<u32>,
    pub localteam_id: u32,
    pub visitorteam_id: u32,
    pub scores: FixtureScores,
    pub time: FixtureTime,
    #[serde(rename = "localTeam")]
    pub local_team: Option<Include<Team>>,
    #[serde(rename = "visitorTeam")]
    pub visitor_team: Option<Include<Team>>,
    pub events: Include<Vec<FixtureEvent>>,
    pub lineup: Include<Vec<FixturePlayer>>,
}

impl Fixture {
    /// Kickoff time in the fixed display timezone. Falls back to parsing
    /// the `date_time` string when the epoch timestamp is missing, and to
    /// the epoch itself if both are unusable.
    pub fn start_time(&self) -> DateTime<FixedOffset> {
        let tz = display_offset();
        if self.time.starting_at.timestamp > 0 {
            if let Some(t) = Utc.timestamp_opt(self.time.starting_at.timestamp, 0).single() {
                return t.with_timezone(&tz);
            }
        }
        NaiveDateTime::parse_from_str(&self.time.starting_at.date_time, "%Y-%m-%d %H:%M:%S")
            .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&tz))
            .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&tz))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topscorer {
    pub position: u32,
    pub season_id: u32,
    pub player_id: u32,
    pub team_id: u32,
    pub stage_id: Option<u32>,
    pub goals: u32,
    pub penalty_goals: u32,
}

/// Season wrapper the topscorers endpoint nests its list under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopscorerSeason {
    pub id: u32,
    pub name: String,
    pub league_id: u32,
    pub goalscorers: Include<Vec<Topscorer>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingStats {
    pub games_played: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub goals_scored: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingTotal {
    // the upstream sends this either as a number or a signed string
    pub goal_difference: serde_json::Value,
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Standing {
    pub position: u32,
    pub team_id: u32,
    pub team_name: String,
    pub group_id: Option<u32>,
    pub group_name: Option<String>,
    pub overall: StandingStats,
    pub home: StandingStats,
    pub away: StandingStats,
    pub total: StandingTotal,
    pub result: Option<String>,
    pub points: u32,
    pub recent_form: String,
    pub status: String,
    pub team: Option<Include<Team>>,
}

/// Group wrapper the standings endpoint nests its table under; cup
/// seasons can carry several of these, league seasons exactly one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingsGroup {
    pub season_id: u32,
    pub name: String,
    pub league_id: u32,
    pub standings: Include<Vec<Standing>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadPlayer {
    pub player_id: u32,
    pub position_id: Option<u32>,
    pub number: Option<u32>,
    pub captain: Option<u32>,
    pub injured: bool,
    pub minutes: u32,
    pub appearences: u32,
    pub lineups: u32,
    pub substitute_in: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellowcards: u32,
    pub redcards: u32,
}
