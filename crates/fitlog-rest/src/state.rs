//! Application state for Axum handlers.

use fitlog_repository::DatabasePoolInterface;
use fitlog_service::{AuthService, CacheStore, UserService, WeightService, WorkoutService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub workout_service: Arc<dyn WorkoutService>,
    pub weight_service: Arc<dyn WeightService>,
    /// Pinged by the readiness check.
    pub database: Arc<dyn DatabasePoolInterface>,
    /// Pinged by the readiness check.
    pub cache_store: Arc<dyn CacheStore>,
}
