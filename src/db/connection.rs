use crate::db::{StoreError, INIT_SCHEMA};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

/// Handle on the embedded snapshot database. The store is opened, used
/// and closed around every read/write rather than held for the process
/// lifetime, so every exit path leaves the file flushed and released.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    database_url: String,
    working_set_bytes: u64,
}

impl SnapshotStore {
    pub fn new(database_url: impl Into<String>, working_set_bytes: u64) -> Self {
        Self {
            database_url: database_url.into(),
            working_set_bytes,
        }
    }

    /// Open a pooled connection to the snapshot database, creating the
    /// file and schema on first use. The page-cache pragma caps the
    /// engine's own in-process buffering at the configured working-set
    /// size, independent of the in-memory cache's footprint.
    pub async fn open(&self) -> Result<SqlitePool, StoreError> {
        if !Sqlite::database_exists(&self.database_url).await.unwrap_or(false) {
            Sqlite::create_database(&self.database_url).await?;
        }

        let pool = SqlitePool::connect(&self.database_url).await?;

        // Enable WAL mode for better concurrency
        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;

        // negative cache_size is in KiB
        let cache_kib = (self.working_set_bytes / 1024).max(1);
        sqlx::query(&format!("PRAGMA cache_size=-{}", cache_kib))
            .execute(&pool)
            .await?;

        sqlx::query(INIT_SCHEMA).execute(&pool).await?;

        Ok(pool)
    }
}
