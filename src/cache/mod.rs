//! In-memory TTL cache for upstream API results

pub mod keys;
pub mod payload;
pub mod persist;

pub use keys::CacheKey;
pub use payload::CachePayload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Per-entry expiration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Use the cache-wide default TTL
    Default,
    /// Live until overwritten or removed
    Never,
    /// Expire after the given duration
    After(Duration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: CachePayload,
    /// `None` means the entry never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// Thread-safe map from key to typed payload with per-entry expiration.
///
/// A single lock guards the backing map; `get`/`set` are individually
/// atomic but compound check-then-act is not, so two concurrent misses on
/// the same key may both fetch upstream (last write wins). That
/// double-fetch is a known inefficiency, not a correctness problem.
pub struct StatsCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl StatsCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Rebuild a cache from a restored snapshot mapping.
    pub fn from_items(items: HashMap<String, CacheEntry>, default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(items),
            default_ttl,
        }
    }

    /// Look up a key. An absent or expired entry is a miss; expired
    /// entries are never handed back, whether or not the sweep has
    /// collected them yet.
    pub async fn get(&self, key: &CacheKey) -> Option<CachePayload> {
        let key = key.to_string();
        let map = self.entries.read().await;
        match map.get(&key) {
            Some(entry) if entry.is_expired(Utc::now()) => {
                debug!("cache miss (expired) for key: {}", key);
                None
            }
            Some(entry) => {
                debug!("cache hit for key: {}", key);
                Some(entry.payload.clone())
            }
            None => {
                debug!("cache miss for key: {}", key);
                None
            }
        }
    }

    /// Store a payload, overwriting any existing entry and its expiry.
    pub async fn set(&self, key: &CacheKey, payload: CachePayload, expiry: Expiry) {
        let expires_at = match expiry {
            Expiry::Default => Some(Utc::now() + self.default_ttl),
            Expiry::Never => None,
            Expiry::After(ttl) => Some(Utc::now() + ttl),
        };
        let mut map = self.entries.write().await;
        map.insert(key.to_string(), CacheEntry { payload, expires_at });
    }

    /// Remove a key, reporting whether it was present.
    pub async fn remove(&self, key: &CacheKey) -> bool {
        let mut map = self.entries.write().await;
        map.remove(&key.to_string()).is_some()
    }

    /// Point-in-time copy of all unexpired entries, used by the snapshot
    /// bridge. A defensive copy, never a live view of the backing map.
    pub async fn items(&self) -> HashMap<String, CacheEntry> {
        let now = Utc::now();
        let map = self.entries.read().await;
        map.iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop expired entries. Memory hygiene only; `get` re-checks
    /// expiration regardless.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut map = self.entries.write().await;
        let before = map.len();
        map.retain(|_, entry| !entry.is_expired(now));
        before - map.len()
    }

    /// Spawn the periodic cleanup sweep.
    pub fn spawn_cleanup(
        self: &Arc<Self>,
        every: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await; // the first tick fires immediately
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let purged = cache.purge_expired().await;
                        if purged > 0 {
                            debug!("cleanup sweep purged {} expired cache entries", purged);
                        }
                    }
                    _ = shutdown.cancelled() => {
                        info!("shutting down cache cleanup sweep");
                        break;
                    }
                }
            }
        })
    }
}
