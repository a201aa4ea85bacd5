//! In-process cache store with TTL expiry.

use super::{expiry_secs, CacheStore};
use async_trait::async_trait;
use fitlog_core::FitlogResult;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Hash-map cache store used when Redis is disabled, and in tests.
///
/// Expiry follows the tokio clock, so paused-time tests can step past a TTL
/// with `tokio::time::advance`. Expired entries are dropped on read, and a
/// write sweeps the whole map at most once per [`SWEEP_INTERVAL`].
#[derive(Debug)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
    last_sweep: Mutex<Instant>,
}

/// Minimum gap between two full sweeps triggered by writes.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            last_sweep: Mutex::new(Instant::now()),
        }
    }
}

impl InMemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of a live entry.
    #[must_use]
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.expires_at - now)
    }

    /// Stores a raw string under `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.sweep_if_due();
        self.entries.write().insert(
            key.into(),
            Entry {
                value: value.into(),
                expires_at: Instant::now() + Duration::from_secs(expiry_secs(ttl)),
            },
        );
    }

    /// Drops expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    fn sweep_if_due(&self) {
        let now = Instant::now();
        {
            let mut last_sweep = self.last_sweep.lock();
            if now.duration_since(*last_sweep) < SWEEP_INTERVAL {
                return;
            }
            *last_sweep = now;
        }

        let removed = self.purge_expired();
        if removed > 0 {
            debug!(removed, "Swept expired cache entries");
        }
    }

    /// Number of stored entries, expired ones included until purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn fetch(&self, key: &str) -> FitlogResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                debug!("Expired key '{}' dropped", key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FitlogResult<()> {
        self.insert(key, value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> FitlogResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    async fn ping(&self) -> FitlogResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
