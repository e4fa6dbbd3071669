use crate::cache::StatsCache;
use crate::config::Config;
use crate::db::connection::SnapshotStore;
use std::sync::Arc;

/// Process-wide shared state, built once at startup and passed into the
/// accessor layer and the refresh scheduler.
pub struct AppState {
    pub config: Config,
    pub cache: Arc<StatsCache>,
    pub store: SnapshotStore,
}
