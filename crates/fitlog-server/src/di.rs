//! Composition root.
//!
//! Every component is built once here and handed to its consumers as an
//! `Arc<dyn Trait>`. Services receive the one shared [`CacheAside`]
//! accessor, so the configured outage policy applies to every cached read.

use fitlog_config::{AppConfig, RedisClientMode, RedisConfig};
use fitlog_core::FitlogResult;
use fitlog_repository::{
    DatabasePool, DatabasePoolInterface, MySqlUserRepository, MySqlWeightRepository, MySqlWorkoutRepository,
    UserRepository, WeightRepository, WorkoutRepository,
};
use fitlog_rest::AppState;
use fitlog_security::{PasswordHasher, PasswordHasherInterface, TokenProvider};
use fitlog_service::{
    AuthService, AuthServiceImpl, BlockingCacheStore, CacheAside, CacheStore, InMemoryCacheStore, RedisCacheStore,
    SyncRedisClient, UserService, UserServiceImpl, WeightService, WeightServiceImpl, WorkoutService,
    WorkoutServiceImpl,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Fully wired application components.
pub struct AppContainer {
    pub database: Arc<dyn DatabasePoolInterface>,
    pub cache_store: Arc<dyn CacheStore>,
    pub token_provider: Arc<TokenProvider>,
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub workout_service: Arc<dyn WorkoutService>,
    pub weight_service: Arc<dyn WeightService>,
}

impl AppContainer {
    /// Connects to the database, applies migrations when configured, opens
    /// the cache store and wires the services.
    ///
    /// An unreachable cache only logs a warning here; requests then follow
    /// the configured `cache.on_unavailable` policy.
    pub async fn build(config: &AppConfig) -> FitlogResult<Self> {
        let database: Arc<dyn DatabasePoolInterface> = Arc::new(DatabasePool::new(&config.database).await?);

        if config.database.run_migrations {
            database.run_migrations().await?;
        }

        let cache_store = build_cache_store(&config.redis)?;
        match cache_store.ping().await {
            Ok(()) => info!("Cache store '{}' reachable", cache_store.backend()),
            Err(e) => warn!(
                "Cache store '{}' unreachable at startup ({:?} policy): {}",
                cache_store.backend(),
                config.cache.on_unavailable,
                e
            ),
        }

        Ok(Self::assemble(config, database, cache_store))
    }

    /// Wires repositories and services over already-built stores.
    pub fn assemble(
        config: &AppConfig,
        database: Arc<dyn DatabasePoolInterface>,
        cache_store: Arc<dyn CacheStore>,
    ) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(database.clone()));
        let workouts: Arc<dyn WorkoutRepository> = Arc::new(MySqlWorkoutRepository::new(database.clone()));
        let weights: Arc<dyn WeightRepository> = Arc::new(MySqlWeightRepository::new(database.clone()));

        let password_hasher: Arc<dyn PasswordHasherInterface> =
            Arc::new(PasswordHasher::with_cost(config.security.password_hash_cost));
        let token_provider = Arc::new(TokenProvider::new(Arc::new(config.security.clone())));

        let cache = CacheAside::new(cache_store.clone(), config.cache.on_unavailable);
        let ttl = config.cache.ttl.clone();

        Self {
            auth_service: Arc::new(AuthServiceImpl::new(
                users.clone(),
                password_hasher.clone(),
                token_provider.clone(),
            )),
            user_service: Arc::new(UserServiceImpl::new(users, password_hasher, cache.clone(), ttl.clone())),
            workout_service: Arc::new(WorkoutServiceImpl::new(workouts, cache.clone(), ttl.clone())),
            weight_service: Arc::new(WeightServiceImpl::new(weights, cache, ttl)),
            database,
            cache_store,
            token_provider,
        }
    }

    /// State handed to the REST router.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState {
            auth_service: self.auth_service.clone(),
            user_service: self.user_service.clone(),
            workout_service: self.workout_service.clone(),
            weight_service: self.weight_service.clone(),
            database: self.database.clone(),
            cache_store: self.cache_store.clone(),
        }
    }
}

/// Chooses the cache store from configuration. Disabled Redis falls back
/// to an in-process store.
pub fn build_cache_store(config: &RedisConfig) -> FitlogResult<Arc<dyn CacheStore>> {
    if !config.enabled {
        info!("Redis disabled; using in-process cache store");
        return Ok(Arc::new(InMemoryCacheStore::new()));
    }

    let store: Arc<dyn CacheStore> = match config.client {
        RedisClientMode::Pooled => Arc::new(RedisCacheStore::from_config(config)?),
        RedisClientMode::Blocking => Arc::new(BlockingCacheStore::new(SyncRedisClient::from_config(config)?)),
    };
    Ok(store)
}
