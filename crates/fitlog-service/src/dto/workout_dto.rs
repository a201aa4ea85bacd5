//! Workout DTOs.

use super::floor_count;
use chrono::{DateTime, Utc};
use fitlog_core::{Exercise, ExerciseSet, FitlogError, FitlogResult, UserId, Workout, WorkoutId, MAX_WORKOUT_MINUTES};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAX_EXERCISE_NAME: usize = 100;

/// Request to log a workout. Numbers may be fractional; they are floored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkoutRequest {
    pub date: DateTime<Utc>,
    /// Minutes, 1 to 1500.
    pub length: f64,
    pub exercises: Vec<ExerciseInput>,
}

/// One exercise as submitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseInput {
    /// `strength` or `cardio`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub sets: Option<Vec<SetInput>>,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SetInput {
    pub weight: f64,
    pub reps: f64,
}

impl CreateWorkoutRequest {
    /// Checks the request in a fixed order, reporting only the first
    /// problem, and builds the workout with floored numbers.
    pub fn into_workout(self, user_id: UserId, now: DateTime<Utc>) -> FitlogResult<Workout> {
        if self.date > now {
            return Err(FitlogError::invalid_argument(
                "Invalid date. Cannot use future times and dates",
            ));
        }

        let length = floor_count(self.length)
            .filter(|minutes| (1..=MAX_WORKOUT_MINUTES).contains(minutes))
            .ok_or_else(|| FitlogError::invalid_argument("Invalid length. Must be between 1 and 1500 minutes"))?;

        if self.exercises.is_empty() {
            return Err(FitlogError::invalid_argument(
                "Invalid exercises. Must include at least one exercise undertaken",
            ));
        }

        let exercises = self
            .exercises
            .into_iter()
            .map(ExerciseInput::into_exercise)
            .collect::<FitlogResult<Vec<_>>>()?;

        Ok(Workout::new(user_id, self.date, length, exercises))
    }
}

impl ExerciseInput {
    fn into_exercise(self) -> FitlogResult<Exercise> {
        if self.kind != "strength" && self.kind != "cardio" {
            return Err(FitlogError::invalid_argument(
                "Invalid exercise type. Must be 'strength' or 'cardio'.",
            ));
        }

        let name = self
            .name
            .filter(|name| (1..=MAX_EXERCISE_NAME).contains(&name.chars().count()))
            .ok_or_else(|| {
                FitlogError::invalid_argument("Invalid exercise name. Must be between 1 and 100 characters.")
            })?;

        if self.kind == "strength" {
            let sets = self.sets.unwrap_or_default();
            if sets.is_empty() {
                return Err(FitlogError::invalid_argument(
                    "Strength exercises must include at least one set.",
                ));
            }
            let sets = sets.into_iter().map(SetInput::into_set).collect::<FitlogResult<Vec<_>>>()?;
            return Ok(Exercise::Strength { name, sets });
        }

        let distance = self
            .distance
            .and_then(floor_count)
            .filter(|distance| *distance > 0)
            .ok_or_else(|| {
                FitlogError::invalid_argument("Invalid distance for cardio exercise. Must be a positive number.")
            })?;
        Ok(Exercise::Cardio { name, distance })
    }
}

impl SetInput {
    fn into_set(self) -> FitlogResult<ExerciseSet> {
        let weight = floor_count(self.weight).ok_or_else(|| {
            FitlogError::invalid_argument("Invalid set weight. Must be a number greater than or equal to 0.")
        })?;
        let reps = floor_count(self.reps).filter(|reps| *reps >= 1).ok_or_else(|| {
            FitlogError::invalid_argument("Invalid set reps. Must be a number greater than or equal to 1.")
        })?;
        Ok(ExerciseSet { weight, reps })
    }
}

/// Body returned after logging a workout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkoutCreatedResponse {
    pub message: String,
    pub id: WorkoutId,
    pub data: Workout,
}

impl From<Workout> for WorkoutCreatedResponse {
    fn from(workout: Workout) -> Self {
        Self {
            message: "Workout created".to_string(),
            id: workout.id,
            data: workout,
        }
    }
}
