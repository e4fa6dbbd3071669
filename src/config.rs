// Configuration for:
// - Upstream sports API base URL and token
// - Snapshot database location and working-set bound
// - Cache TTL / cleanup defaults
// - Background refresh cadence, guard TTL and throttle

use dotenv::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub sports_api_base_url: String,
    pub sports_api_token: String,
    pub snapshot_db_url: String,
    /// Bound on the snapshot store's own in-process page cache
    pub store_working_set_bytes: u64,
    pub cache_default_ttl: Duration,
    pub cache_cleanup_interval: Duration,
    pub refresh_interval: Duration,
    pub refresh_guard_ttl: Duration,
    /// Inter-request sleep during a refresh cycle (upstream rate-limit
    /// courtesy)
    pub refresh_throttle: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

fn env_duration_secs(key: &str, default_secs: u64) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(default_secs))
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let sports_api_base_url = env::var("SPORTS_API_BASE_URL")
            .unwrap_or_else(|_| "https://soccer.sportmonks.com/api".to_string());
        let sports_api_token = env::var("SPORTS_API_TOKEN").unwrap_or_default();
        let snapshot_db_url = env::var("SNAPSHOT_DB_URL")
            .unwrap_or_else(|_| "sqlite:cache_snapshot.db".to_string());
        let store_working_set_bytes = env::var("STORE_WORKING_SET_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500 * 1024 * 1024); // 500MB of working data

        Self {
            sports_api_base_url,
            sports_api_token,
            snapshot_db_url,
            store_working_set_bytes,
            cache_default_ttl: env_duration_secs("CACHE_DEFAULT_TTL_SECS", 50 * 60),
            cache_cleanup_interval: env_duration_secs("CACHE_CLEANUP_INTERVAL_SECS", 10 * 60),
            refresh_interval: env_duration_secs("REFRESH_INTERVAL_SECS", 10 * 60),
            refresh_guard_ttl: env_duration_secs("REFRESH_GUARD_TTL_SECS", 60 * 60),
            refresh_throttle: env_duration_secs("REFRESH_THROTTLE_SECS", 10),
            connect_timeout: env_duration_secs("CONNECT_TIMEOUT_SECS", 5),
            request_timeout: env_duration_secs("REQUEST_TIMEOUT_SECS", 10),
        }
    }
}
