//! Key-value store abstraction for the cache-aside accessor.

use async_trait::async_trait;
use fitlog_core::{FitlogResult, Interface};
use std::time::Duration;

/// Async interface over an external key-value store holding JSON strings.
///
/// Implementations report every I/O failure as
/// [`FitlogError::CacheUnavailable`](fitlog_core::FitlogError::CacheUnavailable),
/// never as a miss.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Gets the value under `key`, or `None` if absent or expired.
    async fn fetch(&self, key: &str) -> FitlogResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl` (whole seconds, at least one).
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FitlogResult<()>;

    /// Removes `key`. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> FitlogResult<bool>;

    /// Round-trips to the store.
    async fn ping(&self) -> FitlogResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Converts a TTL to the whole seconds sent to the store.
#[must_use]
pub fn expiry_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}
