//! Body-weight controller.
//!
//! The list endpoint always reads the caller's own entries.

use crate::{
    extractors::{AuthenticatedUser, JsonBody},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use fitlog_core::{Weight, WeightId};
use fitlog_service::{
    CreateWeightRequest, DeletedResponse, UpdateWeightRequest, WeightCreatedResponse, WeightListQuery,
    WeightUpdatedResponse,
};
use tracing::debug;

/// Creates the weight router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_weights).post(create_weight))
        .route(
            "/:weight_id",
            get(get_weight).put(update_weight).delete(delete_weight),
        )
}

/// The caller's entries, most recent date first.
#[utoipa::path(
    get,
    path = "/weights",
    tag = "weights",
    params(WeightListQuery),
    responses(
        (status = 200, description = "Entries", body = [Weight]),
        (status = 400, description = "Start date after end date", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_weights(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<WeightListQuery>,
) -> ApiResult<Vec<Weight>> {
    debug!("List weights request: {:?}", query);

    let query = query.normalize(user.user_id(), Utc::now())?;
    let response = state.weight_service.list_weights(&user, query).await?;
    ok(response)
}

/// Get an entry by ID (owner or admin).
#[utoipa::path(
    get,
    path = "/weights/{weight_id}",
    tag = "weights",
    params(("weight_id" = String, Path, description = "Weight entry ID")),
    responses(
        (status = 200, description = "Entry found", body = Weight),
        (status = 400, description = "Malformed ID", body = fitlog_core::ErrorResponse),
        (status = 404, description = "Entry not found", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_weight(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(weight_id): Path<String>,
) -> ApiResult<Weight> {
    let weight_id = WeightId::parse_param(&weight_id)?;
    let response = state.weight_service.get_weight(&user, weight_id).await?;
    ok(response)
}

/// Record an entry for the caller.
#[utoipa::path(
    post,
    path = "/weights",
    tag = "weights",
    request_body = CreateWeightRequest,
    responses(
        (status = 201, description = "Entry created", body = WeightCreatedResponse),
        (status = 400, description = "Invalid entry", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_weight(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(request): JsonBody<CreateWeightRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WeightCreatedResponse>>), AppError> {
    let response = state.weight_service.create_weight(&user, request).await?;
    Ok(created(response))
}

/// Update an entry (creator only). Invalid fields are ignored.
#[utoipa::path(
    put,
    path = "/weights/{weight_id}",
    tag = "weights",
    params(("weight_id" = String, Path, description = "Weight entry ID")),
    request_body = UpdateWeightRequest,
    responses(
        (status = 200, description = "Entry updated", body = WeightUpdatedResponse),
        (status = 403, description = "Not the creator", body = fitlog_core::ErrorResponse),
        (status = 404, description = "Entry not found", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_weight(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(weight_id): Path<String>,
    JsonBody(request): JsonBody<UpdateWeightRequest>,
) -> ApiResult<WeightUpdatedResponse> {
    let weight_id = WeightId::parse_param(&weight_id)?;
    let response = state.weight_service.update_weight(&user, weight_id, request).await?;
    ok(response)
}

/// Delete an entry (creator only).
#[utoipa::path(
    delete,
    path = "/weights/{weight_id}",
    tag = "weights",
    params(("weight_id" = String, Path, description = "Weight entry ID")),
    responses(
        (status = 200, description = "Delete result", body = DeletedResponse),
        (status = 403, description = "Not the creator", body = fitlog_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_weight(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(weight_id): Path<String>,
) -> ApiResult<DeletedResponse> {
    let weight_id = WeightId::parse_param(&weight_id)?;
    let response = state.weight_service.delete_weight(&user, weight_id).await?;
    ok(response)
}
