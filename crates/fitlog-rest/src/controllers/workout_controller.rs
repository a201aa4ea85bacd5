//! Workout controller.

use crate::{
    extractors::{AuthenticatedUser, JsonBody},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fitlog_core::{Workout, WorkoutId};
use fitlog_service::{CreateWorkoutRequest, DeletedResponse, WorkoutCreatedResponse};
use tracing::debug;

/// Creates the workout router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_workout))
        .route("/:workout_id", get(get_workout).delete(delete_workout))
}

/// Get a workout by ID (owner or admin).
#[utoipa::path(
    get,
    path = "/workouts/{workout_id}",
    tag = "workouts",
    params(("workout_id" = String, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Workout found", body = Workout),
        (status = 404, description = "Workout not found", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_workout(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(workout_id): Path<String>,
) -> ApiResult<Workout> {
    debug!("Get workout request: {}", workout_id);

    let workout_id = WorkoutId::parse_param(&workout_id)?;
    let response = state.workout_service.get_workout(&user, workout_id).await?;
    ok(response)
}

/// Log a workout for the caller.
#[utoipa::path(
    post,
    path = "/workouts",
    tag = "workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = WorkoutCreatedResponse),
        (status = 400, description = "Invalid workout", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_workout(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(request): JsonBody<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WorkoutCreatedResponse>>), AppError> {
    let response = state.workout_service.create_workout(&user, request).await?;
    Ok(created(response))
}

/// Delete a workout (creator only).
#[utoipa::path(
    delete,
    path = "/workouts/{workout_id}",
    tag = "workouts",
    params(("workout_id" = String, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Delete result", body = DeletedResponse),
        (status = 403, description = "Not the creator", body = fitlog_core::ErrorResponse),
        (status = 404, description = "Workout not found", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(workout_id): Path<String>,
) -> ApiResult<DeletedResponse> {
    let workout_id = WorkoutId::parse_param(&workout_id)?;
    let response = state.workout_service.delete_workout(&user, workout_id).await?;
    ok(response)
}
