//! MySQL workout repository implementation.

use super::parse_uuid;
use crate::{traits::WorkoutRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitlog_core::{Exercise, FitlogError, FitlogResult, UserId, Workout, WorkoutId};
use sqlx::{types::Json, FromRow};
use std::sync::Arc;
use tracing::debug;

/// MySQL workout repository implementation.
#[derive(Clone)]
pub struct MySqlWorkoutRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlWorkoutRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WorkoutRow {
    id: String,
    user_id: String,
    date: DateTime<Utc>,
    length: u32,
    exercises: Json<Vec<Exercise>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WorkoutRow> for Workout {
    type Error = FitlogError;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        Ok(Workout {
            id: WorkoutId::from_uuid(parse_uuid(&row.id)?),
            user_id: UserId::from_uuid(parse_uuid(&row.user_id)?),
            date: row.date,
            length: row.length,
            exercises: row.exercises.0,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl WorkoutRepository for MySqlWorkoutRepository {
    async fn find_by_id(&self, id: WorkoutId) -> FitlogResult<Option<Workout>> {
        debug!("Finding workout by id: {}", id);

        let row = sqlx::query_as::<_, WorkoutRow>(
            "SELECT id, user_id, date, length, exercises, created_at FROM workouts WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Workout::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: UserId, limit: u32) -> FitlogResult<Vec<Workout>> {
        debug!("Finding workouts of user {}, limit {}", user_id, limit);

        let rows = sqlx::query_as::<_, WorkoutRow>(
            r"
            SELECT id, user_id, date, length, exercises, created_at
            FROM workouts
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Workout::try_from).collect()
    }

    async fn save(&self, workout: &Workout) -> FitlogResult<Workout> {
        debug!("Saving workout {} for user {}", workout.id, workout.user_id);

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, date, length, exercises, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(workout.date)
        .bind(workout.length)
        .bind(Json(&workout.exercises))
        .bind(workout.created_at)
        .execute(self.pool.inner())
        .await?;

        Ok(workout.clone())
    }

    async fn delete(&self, id: WorkoutId) -> FitlogResult<u64> {
        debug!("Deleting workout: {}", id);

        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}
