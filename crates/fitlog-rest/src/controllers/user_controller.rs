//! User management controller.

use crate::{
    extractors::{AuthenticatedUser, JsonBody, ValidatedJson},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Router,
};
use fitlog_core::{UserId, Workout};
use fitlog_service::{
    ChangePasswordRequest, ChangeRoleRequest, DeletedResponse, MessageResponse, UpdatedResponse,
    UserResponse, UserSearchQuery, WorkoutListQuery,
};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_users))
        .route("/:user_id", get(get_user).delete(delete_user))
        .route("/:user_id/password", put(change_password))
        .route("/:user_id/role", put(change_role))
        .route("/:user_id/workouts", get(list_user_workouts))
}

/// Search users by username and email fragments (admin only).
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserResponse]),
        (status = 403, description = "Not an admin", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_users(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<UserSearchQuery>,
) -> ApiResult<Vec<UserResponse>> {
    debug!("Search users request: {:?}", query);

    let response = state.user_service.search_users(&user, query.normalize()).await?;
    ok(response)
}

/// Get a user by ID (self or admin).
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed ID", body = fitlog_core::ErrorResponse),
        (status = 404, description = "User not found", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", user_id);

    let user_id = UserId::parse_param(&user_id)?;
    let response = state.user_service.get_user(&user, user_id).await?;
    ok(response)
}

/// Change one's own password.
#[utoipa::path(
    put,
    path = "/users/{user_id}/password",
    tag = "users",
    params(("user_id" = String, Path, description = "User ID")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Old password is wrong", body = fitlog_core::ErrorResponse),
        (status = 403, description = "Not the account owner", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<MessageResponse> {
    let user_id = UserId::parse_param(&user_id)?;
    let response = state.user_service.change_password(&user, user_id, request).await?;
    ok(response)
}

/// Grant or revoke the admin role (admin only).
#[utoipa::path(
    put,
    path = "/users/{user_id}/role",
    tag = "users",
    params(("user_id" = String, Path, description = "User ID")),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UpdatedResponse),
        (status = 400, description = "Missing admin flag", body = fitlog_core::ErrorResponse),
        (status = 403, description = "Not an admin", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_role(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
    JsonBody(request): JsonBody<ChangeRoleRequest>,
) -> ApiResult<UpdatedResponse> {
    let user_id = UserId::parse_param(&user_id)?;
    let response = state.user_service.change_role(&user, user_id, request).await?;
    ok(response)
}

/// Delete an account (self or admin).
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Delete result", body = DeletedResponse),
        (status = 403, description = "Not allowed", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> ApiResult<DeletedResponse> {
    let user_id = UserId::parse_param(&user_id)?;
    let response = state.user_service.delete_user(&user, user_id).await?;
    ok(response)
}

/// A user's most recent workouts (self or admin).
#[utoipa::path(
    get,
    path = "/users/{user_id}/workouts",
    tag = "workouts",
    params(("user_id" = String, Path, description = "User ID"), WorkoutListQuery),
    responses(
        (status = 200, description = "Workouts, newest first", body = [Workout]),
        (status = 403, description = "Not allowed", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_user_workouts(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
    Query(query): Query<WorkoutListQuery>,
) -> ApiResult<Vec<Workout>> {
    let user_id = UserId::parse_param(&user_id)?;
    let response = state
        .workout_service
        .list_user_workouts(&user, user_id, query.limit())
        .await?;
    ok(response)
}
