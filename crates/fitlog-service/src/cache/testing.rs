//! Cache store fakes for unit tests.

use super::{CacheStore, InMemoryCacheStore};
use async_trait::async_trait;
use fitlog_core::{FitlogError, FitlogResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Records every call on top of an in-memory store.
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: InMemoryCacheStore,
    fetches: AtomicUsize,
    sets: Mutex<Vec<(String, Duration)>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Keys and TTLs of every write, in order.
    pub fn sets(&self) -> Vec<(String, Duration)> {
        self.sets.lock().clone()
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn fetch(&self, key: &str) -> FitlogResult<Option<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(key).await
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FitlogResult<()> {
        self.sets.lock().push((key.to_string(), ttl));
        self.inner.set_with_expiry(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> FitlogResult<bool> {
        self.inner.delete(key).await
    }

    async fn ping(&self) -> FitlogResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}

/// Fails reads, writes, or both with `CacheUnavailable`.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub fail_fetch: bool,
    pub fail_set: bool,
    sets: AtomicUsize,
}

impl FailingStore {
    pub fn unreachable() -> Self {
        Self {
            fail_fetch: true,
            fail_set: true,
            ..Self::default()
        }
    }

    pub fn read_only() -> Self {
        Self {
            fail_set: true,
            ..Self::default()
        }
    }

    pub fn set_attempts(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for FailingStore {
    async fn fetch(&self, _key: &str) -> FitlogResult<Option<String>> {
        if self.fail_fetch {
            return Err(FitlogError::cache_unavailable("connection refused"));
        }
        Ok(None)
    }

    async fn set_with_expiry(&self, _key: &str, _value: &str, _ttl: Duration) -> FitlogResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set {
            return Err(FitlogError::cache_unavailable("connection refused"));
        }
        Ok(())
    }

    async fn delete(&self, _key: &str) -> FitlogResult<bool> {
        Err(FitlogError::cache_unavailable("connection refused"))
    }

    async fn ping(&self) -> FitlogResult<()> {
        Err(FitlogError::cache_unavailable("connection refused"))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
