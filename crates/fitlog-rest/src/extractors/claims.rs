//! JWT claims extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use fitlog_core::FitlogError;
use fitlog_security::Claims;

/// Extractor for authenticated user claims.
///
/// The auth middleware validates the bearer token and stores the claims in
/// the request extensions; this extractor turns their absence into a 401.
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| FitlogError::unauthorized("Missing authorization header"))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(FitlogError::unauthorized("Invalid authorization format").into());
        }

        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| FitlogError::unauthorized("Invalid or expired token"))?;

        Ok(AuthenticatedUser(claims))
    }
}
