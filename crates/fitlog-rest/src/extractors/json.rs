//! JSON body extractors that reject with the API error envelope.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use fitlog_core::{field_errors, validation_errors_to_fitlog_error, FitlogError};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` whose rejection is a 400 `INVALID_ARGUMENT` envelope instead of
/// Axum's plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(json_rejection)?;
        Ok(Self(value))
    }
}

/// JSON extractor that also runs the `validator` rules of `T`.
///
/// Failures carry one field error per violated rule in `error.details`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        if let Err(errors) = value.validate() {
            let details = field_errors(&errors);
            return Err(AppError::from(validation_errors_to_fitlog_error(errors)).with_details(details));
        }

        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    FitlogError::invalid_argument(format!("Invalid JSON: {}", rejection.body_text())).into()
}
