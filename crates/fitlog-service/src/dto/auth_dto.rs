//! Authentication DTOs.

use fitlog_core::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(custom(function = "fitlog_core::rules::valid_username"))]
    pub username: String,

    #[validate(
        length(min = 5, message = "Email must be at least 5 characters long"),
        email(message = "Email must be of expected format, e.g. example@email.com")
    )]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    pub password_repeat: String,

    /// Target body weight.
    #[validate(range(min = 0.0, max = 1000.0, message = "Target must be between 0 and 1000"))]
    pub target: Option<f64>,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body returned by signup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub id: UserId,
    /// Access token.
    pub token: String,
}

/// Body returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub username: String,
    /// Access token.
    pub token: String,
}

/// A response body plus the refresh token the transport should set as a cookie.
#[derive(Debug, Clone)]
pub struct Issued<T> {
    pub body: T,
    pub refresh_token: String,
}
