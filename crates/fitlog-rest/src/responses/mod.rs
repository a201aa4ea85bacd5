//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitlog_core::{ErrorResponse, FitlogError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(error: ErrorResponse) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError {
    pub error: FitlogError,
    pub response: ErrorResponse,
}

impl AppError {
    /// Server errors are logged when turned into a response, except cache
    /// errors, which the cache layer logs with the offending key.
    fn logged_on_response(&self) -> bool {
        self.error.status_code() >= 500 && !self.error.is_cache_error()
    }

    /// Attaches field-level details to the error body.
    #[must_use]
    pub fn with_details(mut self, details: Vec<fitlog_core::FieldError>) -> Self {
        self.response = self.response.with_details(details);
        self
    }
}

impl From<FitlogError> for AppError {
    fn from(error: FitlogError) -> Self {
        let response = ErrorResponse::from_error(&error);
        Self { error, response }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.logged_on_response() {
            error!(code = %self.response.code, error = %self.error, "Request failed");
        }

        let body = Json(ApiResponse::<()>::error(self.response));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}
