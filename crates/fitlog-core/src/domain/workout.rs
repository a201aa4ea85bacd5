//! Workout record and its exercises.

use crate::{UserId, WorkoutId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on a workout's length, in minutes.
pub const MAX_WORKOUT_MINUTES: u32 = 1500;

/// One logged training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Workout {
    pub id: WorkoutId,
    pub user_id: UserId,
    /// When the session took place.
    pub date: DateTime<Utc>,
    /// Length in minutes.
    pub length: u32,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Creates a workout owned by `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, date: DateTime<Utc>, length: u32, exercises: Vec<Exercise>) -> Self {
        Self {
            id: WorkoutId::new(),
            user_id,
            date,
            length,
            exercises,
            created_at: Utc::now(),
        }
    }

    /// Checks whether `user_id` created this workout.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// A single exercise within a workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Exercise {
    /// Weighted sets.
    Strength { name: String, sets: Vec<ExerciseSet> },
    /// Distance-based work.
    Cardio { name: String, distance: u32 },
}

impl Exercise {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Strength { name, .. } | Self::Cardio { name, .. } => name,
        }
    }
}

/// One set of a strength exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExerciseSet {
    pub weight: u32,
    pub reps: u32,
}
