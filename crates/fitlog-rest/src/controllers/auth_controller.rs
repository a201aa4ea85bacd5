//! Authentication controller.
//!
//! Access tokens travel in response bodies; refresh tokens only ever travel
//! in the `jwt` cookie.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use fitlog_core::FitlogError;
use fitlog_service::{LoginRequest, MessageResponse, SignupRequest, SignupResponse, TokenResponse};
use std::time::Duration;
use tracing::debug;

/// Name of the refresh token cookie.
pub const REFRESH_COOKIE: &str = "jwt";

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, refresh cookie set", body = SignupResponse),
        (status = 400, description = "Invalid request", body = fitlog_core::ErrorResponse),
        (status = 409, description = "Username or email taken", body = fitlog_core::ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<SignupResponse>>), AppError> {
    debug!("Signup request for: {}", request.username);

    let issued = state.auth_service.signup(request).await?;
    let jar = jar.add(refresh_cookie(issued.refresh_token, state.auth_service.refresh_lifetime())?);

    Ok((StatusCode::CREATED, jar, Json(ApiResponse::success(issued.body))))
}

/// Log in with username and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, refresh cookie set", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = fitlog_core::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), AppError> {
    debug!("Login request for: {}", request.username);

    let issued = state.auth_service.login(request).await?;
    let jar = jar.add(refresh_cookie(issued.refresh_token, state.auth_service.refresh_lifetime())?);

    Ok((jar, Json(ApiResponse::success(issued.body))))
}

/// Exchange the refresh cookie for a new access token.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "New access token", body = TokenResponse),
        (status = 401, description = "Missing or invalid refresh cookie", body = fitlog_core::ErrorResponse)
    )
)]
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> ApiResult<TokenResponse> {
    let token = jar.get(REFRESH_COOKIE).map(|cookie| cookie.value());
    let response = state.auth_service.refresh(token).await?;
    ok(response)
}

/// Clear the refresh cookie.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses((status = 200, description = "Cookie cleared", body = MessageResponse))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.remove(Cookie::build((REFRESH_COOKIE, "")).path("/"));
    (jar, Json(ApiResponse::success(MessageResponse::new("Logged out"))))
}

/// The refresh cookie: `HttpOnly; Secure; SameSite=None; Path=/` with the
/// refresh token's lifetime as `Max-Age`.
fn refresh_cookie(token: String, lifetime: Duration) -> Result<Cookie<'static>, AppError> {
    Cookie::parse(format!(
        "{REFRESH_COOKIE}={token}; HttpOnly; Secure; SameSite=None; Path=/; Max-Age={}",
        lifetime.as_secs()
    ))
    .map_err(|e| FitlogError::internal(format!("Failed to build refresh cookie: {e}")).into())
}
