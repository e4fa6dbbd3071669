//! Snapshot bridge between the in-memory cache and the disk store
//!
//! Persistence is a best-effort durability aid: every failure here is
//! logged and absorbed, and serving requests never depends on it. The
//! whole cache is rewritten on each persist rather than diffed — the
//! snapshot is small and the simplicity is intentional.

use crate::cache::{CacheEntry, StatsCache};
use crate::db::{connection::SnapshotStore, snapshot, StoreError};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fixed key of the single snapshot record.
pub const SNAPSHOT_KEY: &str = "cachedbstore";

/// On-disk shape of the snapshot: the full key-to-entry mapping with
/// each entry's original expiry.
pub type SnapshotMap = HashMap<String, CacheEntry>;

/// Serialize the cache's current contents and write them to the store.
/// Safe to call after every cache-mutating accessor call.
pub async fn persist(cache: &StatsCache, store: &SnapshotStore) -> Result<(), StoreError> {
    let items = cache.items().await;
    let bytes = serde_json::to_vec(&items)?;

    let pool = store.open().await?;
    let result = snapshot::put_blob(&pool, SNAPSHOT_KEY, &bytes).await;
    pool.close().await;
    result?;

    debug!("persisted cache snapshot: {} entries, {} bytes", items.len(), bytes.len());
    Ok(())
}

/// Rebuild the cache from the persisted snapshot. Any failure — missing
/// file, missing record, corrupt bytes, unknown payload tag — degrades
/// to a fresh empty cache and never aborts startup.
pub async fn restore(store: &SnapshotStore, default_ttl: Duration) -> StatsCache {
    match try_restore(store).await {
        Ok(items) => {
            info!("restored {} cache entries from snapshot", items.len());
            StatsCache::from_items(items, default_ttl)
        }
        Err(e) => {
            warn!("cache snapshot restore failed, starting empty: {}", e);
            StatsCache::new(default_ttl)
        }
    }
}

async fn try_restore(store: &SnapshotStore) -> Result<SnapshotMap, StoreError> {
    let pool = store.open().await?;
    let blob = snapshot::get_blob(&pool, SNAPSHOT_KEY).await;
    pool.close().await;

    let blob = blob?.ok_or(StoreError::Missing)?;
    Ok(serde_json::from_slice(&blob)?)
}
