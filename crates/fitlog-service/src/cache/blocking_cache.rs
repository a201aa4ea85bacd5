//! Adapter that runs a synchronous cache client on the blocking thread pool.

use super::{expiry_secs, CacheStore};
use async_trait::async_trait;
use fitlog_config::RedisConfig;
use fitlog_core::{FitlogError, FitlogResult};
use parking_lot::Mutex;
use redis::Commands;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A synchronous key-value client.
pub trait BlockingStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> FitlogResult<Option<String>>;

    fn set_ex(&self, key: &str, value: &str, secs: u64) -> FitlogResult<()>;

    fn del(&self, key: &str) -> FitlogResult<bool>;

    fn ping(&self) -> FitlogResult<()>;
}

/// [`CacheStore`] over a [`BlockingStore`]. Each call moves to
/// `spawn_blocking`, so the accessor sees the same async interface whatever
/// client is configured.
pub struct BlockingCacheStore<C: BlockingStore> {
    client: Arc<C>,
}

impl<C: BlockingStore> BlockingCacheStore<C> {
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    async fn run<T, F>(&self, op: F) -> FitlogResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&C) -> FitlogResult<T> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || op(&client))
            .await
            .map_err(|e| FitlogError::cache_unavailable(format!("Blocking cache task failed: {e}")))?
    }
}

#[async_trait]
impl<C: BlockingStore> CacheStore for BlockingCacheStore<C> {
    async fn fetch(&self, key: &str) -> FitlogResult<Option<String>> {
        let key = key.to_string();
        self.run(move |client| client.get(&key)).await
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> FitlogResult<()> {
        let (key, value) = (key.to_string(), value.to_string());
        let secs = expiry_secs(ttl);
        self.run(move |client| client.set_ex(&key, &value, secs)).await
    }

    async fn delete(&self, key: &str) -> FitlogResult<bool> {
        let key = key.to_string();
        self.run(move |client| client.del(&key)).await
    }

    async fn ping(&self) -> FitlogResult<()> {
        self.run(|client| client.ping()).await
    }

    fn backend(&self) -> &'static str {
        "redis-blocking"
    }
}

/// Synchronous Redis client with a small set of idle connections.
///
/// A command checks out an idle connection, or opens one with the
/// configured timeout, and runs without holding the lock. Connections are
/// only returned after a successful command; a failed one is dropped.
pub struct SyncRedisClient {
    client: redis::Client,
    idle: Mutex<Vec<redis::Connection>>,
    max_idle: usize,
    timeout: Duration,
}

impl SyncRedisClient {
    /// Parses the URL. No connection is opened until the first command.
    pub fn open(url: &str, timeout: Duration) -> FitlogResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| FitlogError::Configuration(format!("Invalid Redis URL: {e}")))?;
        Ok(Self {
            client,
            idle: Mutex::new(Vec::new()),
            max_idle: 1,
            timeout,
        })
    }

    /// Builds a client from the `redis` configuration section.
    pub fn from_config(config: &RedisConfig) -> FitlogResult<Self> {
        let mut client = Self::open(&config.url, config.timeout())?;
        client.max_idle = (config.pool_size as usize).max(1);
        Ok(client)
    }

    fn connect(&self) -> FitlogResult<redis::Connection> {
        debug!("Opening blocking Redis connection");
        let unavailable = |e: redis::RedisError| FitlogError::cache_unavailable(format!("Failed to connect to Redis: {e}"));

        let conn = self.client.get_connection_with_timeout(self.timeout).map_err(unavailable)?;
        conn.set_read_timeout(Some(self.timeout)).map_err(unavailable)?;
        conn.set_write_timeout(Some(self.timeout)).map_err(unavailable)?;
        Ok(conn)
    }

    fn checkout(&self) -> FitlogResult<redis::Connection> {
        let idle = self.idle.lock().pop();
        match idle {
            Some(conn) => Ok(conn),
            None => self.connect(),
        }
    }

    fn checkin(&self, conn: redis::Connection) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(conn);
        }
    }

    fn with_connection<T>(
        &self,
        what: &str,
        command: impl FnOnce(&mut redis::Connection) -> redis::RedisResult<T>,
    ) -> FitlogResult<T> {
        let mut conn = self.checkout()?;
        let result = command(&mut conn);
        if result.is_ok() {
            self.checkin(conn);
        }
        result.map_err(|e| FitlogError::cache_unavailable(format!("{what} failed: {e}")))
    }

    /// Number of connections waiting for reuse.
    #[must_use]
    pub fn idle_connections(&self) -> usize {
        self.idle.lock().len()
    }
}

impl BlockingStore for SyncRedisClient {
    fn get(&self, key: &str) -> FitlogResult<Option<String>> {
        self.with_connection("GET", |conn| conn.get(key))
    }

    fn set_ex(&self, key: &str, value: &str, secs: u64) -> FitlogResult<()> {
        self.with_connection("SETEX", |conn| conn.set_ex(key, value, secs))
    }

    fn del(&self, key: &str) -> FitlogResult<bool> {
        self.with_connection("DEL", |conn| conn.del::<_, i64>(key).map(|n| n > 0))
    }

    fn ping(&self) -> FitlogResult<()> {
        self.with_connection("PING", |conn| redis::cmd("PING").query::<String>(conn).map(drop))
    }
}

impl std::fmt::Debug for SyncRedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRedisClient")
            .field("idle", &self.idle_connections())
            .field("max_idle", &self.max_idle)
            .field("timeout", &self.timeout)
            .finish()
    }
}
