//! The read-through protocol.

use super::{CacheKey, CacheStore};
use fitlog_config::OnUnavailable;
use fitlog_core::{FitlogError, FitlogResult};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Whether a fallback result is worth caching.
///
/// `None` and empty lists are returned to the caller but never stored.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Cache-aside accessor shared by every cached read.
///
/// Stateless apart from the injected store and outage policy. Concurrent
/// misses on one key each run their fallback and each write the entry.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    policy: OnUnavailable,
}

impl CacheAside {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, policy: OnUnavailable) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    #[must_use]
    pub const fn policy(&self) -> OnUnavailable {
        self.policy
    }

    /// Returns the cached value under `key`, or runs `fallback` and caches a
    /// non-empty result for `ttl`.
    ///
    /// # Errors
    ///
    /// - `CacheUnavailable` if the store cannot be read and the policy is `Fail`.
    /// - `MalformedCacheEntry` if the stored JSON does not decode as `T`.
    /// - Any error from `fallback`, unchanged.
    ///
    /// A failed write after a successful fallback is logged and swallowed.
    pub async fn read_through<T, F, Fut>(&self, key: &CacheKey, ttl: Duration, fallback: F) -> FitlogResult<T>
    where
        T: Serialize + DeserializeOwned + Presence + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = FitlogResult<T>> + Send,
    {
        let cached = match self.store.fetch(key.as_str()).await {
            Ok(cached) => cached,
            Err(err) if self.policy == OnUnavailable::Bypass && err.is_cache_error() => {
                warn!(key = %key, backend = self.store.backend(), error = %err, "Cache unavailable, reading from the database");
                return fallback().await;
            }
            Err(err) => {
                error!(key = %key, backend = self.store.backend(), error = %err, "Cache read failed");
                return Err(err);
            }
        };

        if let Some(json) = cached {
            debug!(key = %key, "Cache hit");
            return serde_json::from_str(&json).map_err(|e| {
                error!(key = %key, error = %e, "Cached entry does not decode");
                FitlogError::malformed_cache_entry(key.as_str(), e)
            });
        }

        debug!(key = %key, "Cache miss");
        let value = fallback().await?;

        if !value.is_present() {
            debug!(key = %key, "Empty result, not cached");
            return Ok(value);
        }

        match serde_json::to_string(&value) {
            Ok(json) => match self.store.set_with_expiry(key.as_str(), &json, ttl).await {
                Ok(()) => debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached result"),
                Err(err) => warn!(key = %key, error = %err, "Failed to cache result"),
            },
            Err(err) => warn!(key = %key, error = %err, "Failed to serialize result for caching"),
        }

        Ok(value)
    }
}

impl std::fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("backend", &self.store.backend())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testing::{CountingStore, FailingStore};
    use crate::cache::{build_key, KeyParams};
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: u32,
        name: String,
    }

    fn key(name: &str) -> CacheKey {
        build_key("test", &KeyParams::new().with("name", name)).unwrap()
    }

    fn accessor(store: Arc<dyn CacheStore>) -> CacheAside {
        CacheAside::new(store, OnUnavailable::Fail)
    }

    #[tokio::test]
    async fn test_hit_skips_fallback() {
        let store = Arc::new(CountingStore::new());
        store.inner.insert("test-a", r#"{"id":1,"name":"cached"}"#, Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let value: Option<Record> = accessor(store.clone())
            .read_through(&key("a"), Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            })
            .await
            .unwrap();

        assert_eq!(value.map(|r| r.name), Some("cached".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(store.sets().is_empty());
    }

    #[tokio::test]
    async fn test_miss_fills_then_hits() {
        let store = Arc::new(CountingStore::new());
        let cache = accessor(store.clone());
        let calls = AtomicUsize::new(0);
        let load = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Record {
                id: 7,
                name: "fresh".to_string(),
            }))
        };

        let first: Option<Record> = cache.read_through(&key("b"), Duration::from_secs(1800), load).await.unwrap();
        let second: Option<Record> = cache.read_through(&key("b"), Duration::from_secs(1800), load).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.fetches(), 2);
        assert_eq!(store.sets(), vec![("test-b".to_string(), Duration::from_secs(1800))]);
    }

    #[tokio::test]
    async fn test_empty_results_not_cached() {
        let store = Arc::new(CountingStore::new());
        let cache = accessor(store.clone());

        let none: Option<Record> = cache
            .read_through(&key("none"), Duration::from_secs(60), || async { Ok(None) })
            .await
            .unwrap();
        let empty: Vec<Record> = cache
            .read_through(&key("empty"), Duration::from_secs(60), || async { Ok(Vec::new()) })
            .await
            .unwrap();

        assert!(none.is_none());
        assert!(empty.is_empty());
        assert!(store.sets().is_empty());
        assert!(store.inner.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_error_not_miss() {
        let store = Arc::new(CountingStore::new());
        store.inner.insert("test-c", "{not json", Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let err = accessor(store.clone())
            .read_through::<Option<Record>, _, _>(&key("c"), Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FitlogError::MalformedCacheEntry { ref key, .. } if key == "test-c"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let store = Arc::new(CountingStore::new());
        store.inner.insert("test-d", r#"{"unexpected":true}"#, Duration::from_secs(60));

        let err = accessor(store)
            .read_through::<Vec<Record>, _, _>(&key("d"), Duration::from_secs(60), || async { Ok(Vec::new()) })
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "MALFORMED_CACHE_ENTRY");
    }

    #[tokio::test]
    async fn test_fallback_error_propagates_unchanged() {
        let store = Arc::new(CountingStore::new());

        let err = accessor(store.clone())
            .read_through::<Option<Record>, _, _>(&key("e"), Duration::from_secs(60), || async {
                Err(FitlogError::upstream("database down"))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FitlogError::UpstreamFailure(ref m) if m == "database down"));
        assert!(store.sets().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_by_default() {
        let calls = AtomicUsize::new(0);

        let err = accessor(Arc::new(FailingStore::unreachable()))
            .read_through::<Option<Record>, _, _>(&key("f"), Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FitlogError::CacheUnavailable(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bypass_policy_serves_fallback_without_writing() {
        let store = Arc::new(FailingStore::unreachable());
        let cache = CacheAside::new(store.clone(), OnUnavailable::Bypass);

        let value: Option<Record> = cache
            .read_through(&key("g"), Duration::from_secs(60), || async {
                Ok(Some(Record {
                    id: 1,
                    name: "direct".to_string(),
                }))
            })
            .await
            .unwrap();

        assert_eq!(value.map(|r| r.id), Some(1));
        assert_eq!(store.set_attempts(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_still_returns_value() {
        let store = Arc::new(FailingStore::read_only());

        let value: Vec<Record> = accessor(store.clone())
            .read_through(&key("h"), Duration::from_secs(60), || async {
                Ok(vec![Record {
                    id: 2,
                    name: "kept".to_string(),
                }])
            })
            .await
            .unwrap();

        assert_eq!(value.len(), 1);
        assert_eq!(store.set_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_refetched_after_ttl() {
        let store = Arc::new(CountingStore::new());
        let cache = accessor(store.clone());
        let calls = AtomicUsize::new(0);
        let load = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1_u32, 2, 3])
        };

        let _: Vec<u32> = cache.read_through(&key("i"), Duration::from_secs(300), load).await.unwrap();
        tokio::time::advance(Duration::from_secs(299)).await;
        let _: Vec<u32> = cache.read_through(&key("i"), Duration::from_secs(300), load).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        let _: Vec<u32> = cache.read_through(&key("i"), Duration::from_secs(300), load).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
