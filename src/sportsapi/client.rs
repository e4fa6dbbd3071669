use crate::config::Config;
use crate::sportsapi::models::{
    DataEnvelope, Fixture, League, Season, SquadPlayer, Standing, StandingsGroup, Team, Topscorer,
    TopscorerSeason,
};
use crate::sportsapi::options::ListOptions;
use serde::de::DeserializeOwned;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info};

const LEAGUES_BASE_PATH: &str = "v2.0/leagues";
const SEASONS_BASE_PATH: &str = "v2.0/seasons";
const TEAMS_BASE_PATH: &str = "v2.0/teams";
const STANDINGS_BASE_PATH: &str = "v2.0/standings";
const TOPSCORERS_BASE_PATH: &str = "v2.0/topscorers";
const SQUAD_BASE_PATH: &str = "v2.0/squad";
const LIVESCORES_BASE_PATH: &str = "v2.0/livescores";

const DEFAULT_STANDINGS_INCLUDE: &str = "standings.team";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid argument {field}: {reason}")]
    InvalidArg {
        field: &'static str,
        reason: &'static str,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The upstream seam. The accessor layer and the refresh scheduler only
/// see this trait, so tests can substitute a fake upstream.
pub trait SportsProvider: Send + Sync + 'static {
    fn get_league(
        &self,
        league_id: u32,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<League, ClientError>> + Send;

    fn get_season(
        &self,
        season_id: u32,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Season, ClientError>> + Send;

    fn list_teams(
        &self,
        season_id: u32,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Vec<Team>, ClientError>> + Send;

    fn list_standings(
        &self,
        season_id: u32,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Vec<Standing>, ClientError>> + Send;

    fn list_topscorers(
        &self,
        season_id: u32,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Vec<Topscorer>, ClientError>> + Send;

    fn list_squad(
        &self,
        season_id: u32,
        team_id: u32,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Vec<SquadPlayer>, ClientError>> + Send;

    fn list_livescores(
        &self,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Vec<Fixture>, ClientError>> + Send;

    fn list_livescores_now(
        &self,
        opt: &ListOptions,
    ) -> impl Future<Output = Result<Vec<Fixture>, ClientError>> + Send;
}

/// HTTP client for the upstream API. Authentication is an `api_token`
/// query parameter on every request; no call is retried here.
#[derive(Clone)]
pub struct SportsClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl SportsClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        info!(
            "initializing sports client for {} (connect timeout {:?}, request timeout {:?})",
            config.sports_api_base_url, config.connect_timeout, config.request_timeout
        );

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.sports_api_base_url.trim_end_matches('/').to_string(),
            api_token: config.sports_api_token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        opt: &ListOptions,
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut query: Vec<(&str, String)> = vec![("api_token", self.api_token.clone())];
        query.extend(opt.query_pairs());

        debug!("GET {}", url);
        let resp = self.http.get(&url).query(&query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

impl SportsProvider for SportsClient {
    async fn get_league(&self, league_id: u32, opt: &ListOptions) -> Result<League, ClientError> {
        if league_id == 0 {
            return Err(ClientError::InvalidArg {
                field: "league_id",
                reason: "cannot be 0",
            });
        }
        self.get_json(&format!("{}/{}", LEAGUES_BASE_PATH, league_id), opt)
            .await
    }

    async fn get_season(&self, season_id: u32, opt: &ListOptions) -> Result<Season, ClientError> {
        if season_id == 0 {
            return Err(ClientError::InvalidArg {
                field: "season_id",
                reason: "cannot be 0",
            });
        }
        self.get_json(&format!("{}/{}", SEASONS_BASE_PATH, season_id), opt)
            .await
    }

    async fn list_teams(&self, season_id: u32, opt: &ListOptions) -> Result<Vec<Team>, ClientError> {
        if season_id == 0 {
            return Err(ClientError::InvalidArg {
                field: "season_id",
                reason: "cannot be 0",
            });
        }
        self.get_json(&format!("{}/season/{}", TEAMS_BASE_PATH, season_id), opt)
            .await
    }

    async fn list_standings(
        &self,
        season_id: u32,
        opt: &ListOptions,
    ) -> Result<Vec<Standing>, ClientError> {
        if season_id == 0 {
            return Err(ClientError::InvalidArg {
                field: "season_id",
                reason: "cannot be 0",
            });
        }

        // append the default include unless told otherwise
        let mut opt = opt.clone();
        if opt.include.is_none() {
            opt.include = Some(DEFAULT_STANDINGS_INCLUDE.to_string());
        }

        let groups: Vec<StandingsGroup> = self
            .get_json(&format!("{}/season/{}", STANDINGS_BASE_PATH, season_id), &opt)
            .await?;

        // TODO: surface every group for cup group stages instead of the first
        Ok(groups
            .into_iter()
            .next()
            .map(|g| g.standings.data)
            .unwrap_or_default())
    }

    async fn list_topscorers(
        &self,
        season_id: u32,
        opt: &ListOptions,
    ) -> Result<Vec<Topscorer>, ClientError> {
        if season_id == 0 {
            return Err(ClientError::InvalidArg {
                field: "season_id",
                reason: "cannot be 0",
            });
        }
        let season: TopscorerSeason = self
            .get_json(&format!("{}/season/{}", TOPSCORERS_BASE_PATH, season_id), opt)
            .await?;
        Ok(season.goalscorers.data)
    }

    async fn list_squad(
        &self,
        season_id: u32,
        team_id: u32,
        opt: &ListOptions,
    ) -> Result<Vec<SquadPlayer>, ClientError> {
        if season_id == 0 || team_id == 0 {
            return Err(ClientError::InvalidArg {
                field: "season_id/team_id",
                reason: "cannot be 0",
            });
        }
        self.get_json(
            &format!("{}/season/{}/team/{}", SQUAD_BASE_PATH, season_id, team_id),
            opt,
        )
        .await
    }

    async fn list_livescores(&self, opt: &ListOptions) -> Result<Vec<Fixture>, ClientError> {
        self.get_json(LIVESCORES_BASE_PATH, opt).await
    }

    async fn list_livescores_now(&self, opt: &ListOptions) -> Result<Vec<Fixture>, ClientError> {
        self.get_json(&format!("{}/now", LIVESCORES_BASE_PATH), opt)
            .await
    }
}
