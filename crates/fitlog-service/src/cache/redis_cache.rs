//! Redis-backed cache store using a deadpool connection pool.

use super::{expiry_secs, CacheStore};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime};
use fitlog_config::RedisConfig;
use fitlog_core::{FitlogError, FitlogResult};
use std::time::Duration;
use tracing::{debug, info};

/// Async Redis cache store.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates a pool from configuration.
    ///
    /// No connection is opened here, so an unreachable server does not fail
    /// construction; it surfaces on the first command instead.
    pub fn from_config(config: &RedisConfig) -> FitlogResult<Self> {
        let mut cfg = Config::from_url(&config.url);
        cfg.pool = Some(PoolConfig::new(config.pool_size as usize));

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| FitlogError::Configuration(format!("Failed to create Redis pool: {e}")))?;

        info!("Redis pool created (max size {})", config.pool_size);
        Ok(Self { pool })
    }

    async fn get_conn(&self) -> FitlogResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| FitlogError::cache_unavailable(format!("Failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn fetch(&self, key: &str) -> FitlogResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        conn.get(key)
            .await
            .map_err(|e| FitlogError::cache_unavailable(format!("Failed to get key '{key}': {e}")))
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FitlogResult<()> {
        let mut conn = self.get_conn().await?;
        let secs = expiry_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, secs)
            .await
            .map_err(|e| FitlogError::cache_unavailable(format!("Failed to set key '{key}': {e}")))?;

        debug!("Stored key '{}' with TTL {}s", key, secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> FitlogResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| FitlogError::cache_unavailable(format!("Failed to delete key '{key}': {e}")))?;

        Ok(deleted > 0)
    }

    async fn ping(&self) -> FitlogResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| FitlogError::cache_unavailable(format!("PING failed: {e}")))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheStore")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_cache_unavailable() {
        let store = RedisCacheStore::from_config(&RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            pool_size: 1,
            ..RedisConfig::default()
        })
        .unwrap();

        let err = store.fetch("getUserById-x").await.unwrap_err();
        assert!(matches!(err, FitlogError::CacheUnavailable(_)));
        assert!(store.ping().await.is_err());
        assert_eq!(store.backend(), "redis");
    }
}
