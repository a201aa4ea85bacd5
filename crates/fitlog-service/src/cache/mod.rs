//! Cache-aside read layer.
//!
//! [`cache_keys`] derives deterministic keys, [`CacheStore`] abstracts the
//! key-value backend, and [`CacheAside`] runs the read-through protocol on top.

mod blocking_cache;
mod cache_aside;
pub mod cache_keys;
mod cache_store;
mod memory_cache;
mod redis_cache;

pub use blocking_cache::{BlockingCacheStore, BlockingStore, SyncRedisClient};
pub use cache_aside::{CacheAside, Presence};
pub use cache_keys::{build_key, CacheKey, KeyParams, KeyValue};
pub use cache_store::{expiry_secs, CacheStore};
pub use memory_cache::InMemoryCacheStore;
pub use redis_cache::RedisCacheStore;

#[cfg(test)]
pub(crate) mod testing;
