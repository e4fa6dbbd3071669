//! Embedded snapshot store

pub mod connection;
pub mod snapshot;

pub use connection::SnapshotStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("no snapshot record found")]
    Missing,
}

pub const INIT_SCHEMA: &str = r#"
-- Single-record blob table holding the serialized cache snapshot
CREATE TABLE IF NOT EXISTS snapshots (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;
