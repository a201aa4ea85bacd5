//! Workout service.

use crate::cache::{cache_keys, CacheAside};
use crate::dto::{CreateWorkoutRequest, DeletedResponse, WorkoutCreatedResponse};
use chrono::Utc;
use fitlog_config::CacheTtlConfig;
use fitlog_core::{FitlogError, FitlogResult, Interface, UserId, UserRole, Workout, WorkoutId};
use fitlog_repository::WorkoutRepository;
use fitlog_security::{Claims, ClaimsExt};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Workout service trait.
#[async_trait]
pub trait WorkoutService: Interface + Send + Sync {
    /// Gets a workout by ID. Owner or admin.
    async fn get_workout(&self, claims: &Claims, id: WorkoutId) -> FitlogResult<Workout>;

    /// Lists a user's most recent workouts. Self or admin.
    async fn list_user_workouts(&self, claims: &Claims, user_id: UserId, limit: u32) -> FitlogResult<Vec<Workout>>;

    /// Logs a workout for the caller.
    async fn create_workout(&self, claims: &Claims, request: CreateWorkoutRequest) -> FitlogResult<WorkoutCreatedResponse>;

    /// Deletes a workout. Creator only.
    async fn delete_workout(&self, claims: &Claims, id: WorkoutId) -> FitlogResult<DeletedResponse>;
}

/// Workout service implementation.
pub struct WorkoutServiceImpl {
    workout_repository: Arc<dyn WorkoutRepository>,
    cache: CacheAside,
    ttl: CacheTtlConfig,
}

impl WorkoutServiceImpl {
    pub fn new(workout_repository: Arc<dyn WorkoutRepository>, cache: CacheAside, ttl: CacheTtlConfig) -> Self {
        Self {
            workout_repository,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl WorkoutService for WorkoutServiceImpl {
    async fn get_workout(&self, claims: &Claims, id: WorkoutId) -> FitlogResult<Workout> {
        debug!("Getting workout: {}", id);

        let key = cache_keys::workout_by_id(id)?;
        let workout = self
            .cache
            .read_through(&key, self.ttl.workout_by_id(), || async {
                self.workout_repository.find_by_id(id).await
            })
            .await?
            .ok_or_else(|| FitlogError::not_found("Workout", id))?;

        claims.require_role_or_owner(UserRole::Admin, workout.user_id)?;
        Ok(workout)
    }

    async fn list_user_workouts(&self, claims: &Claims, user_id: UserId, limit: u32) -> FitlogResult<Vec<Workout>> {
        debug!("Listing workouts for user {} (limit {})", user_id, limit);
        claims.require_role_or_owner(UserRole::Admin, user_id)?;

        let key = cache_keys::users_workouts(user_id, limit)?;
        self.cache
            .read_through(&key, self.ttl.user_workouts(), || async {
                self.workout_repository.find_by_user(user_id, limit).await
            })
            .await
    }

    async fn create_workout(&self, claims: &Claims, request: CreateWorkoutRequest) -> FitlogResult<WorkoutCreatedResponse> {
        let workout = request.into_workout(claims.user_id(), Utc::now())?;
        let saved = self.workout_repository.save(&workout).await?;

        info!("Workout created: {} for user {}", saved.id, saved.user_id);
        Ok(WorkoutCreatedResponse::from(saved))
    }

    async fn delete_workout(&self, claims: &Claims, id: WorkoutId) -> FitlogResult<DeletedResponse> {
        let workout = self
            .workout_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| FitlogError::not_found("Workout", id))?;
        claims.require_owner(workout.user_id)?;

        let deleted = self.workout_repository.delete(id).await?;
        info!("Workout deleted: {}", id);
        Ok(DeletedResponse::new(deleted))
    }
}
