pub mod cache;
pub mod config;
pub mod db;
pub mod refresh;
pub mod sportsapi;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use cache::{CacheKey, CachePayload, Expiry, StatsCache};
pub use config::Config;
pub use db::connection::SnapshotStore;
pub use sportsapi::client::{ClientError, SportsClient, SportsProvider};
pub use state::AppState;
pub use stats::{StatsApi, StatsCalendar};
