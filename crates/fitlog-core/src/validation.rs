//! Validation utilities.

use crate::{FieldError, FitlogError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `FitlogError` on failure.
    fn validate_request(&self) -> Result<(), FitlogError> {
        self.validate().map_err(validation_errors_to_fitlog_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `FitlogError`.
#[must_use]
pub fn validation_errors_to_fitlog_error(errors: ValidationErrors) -> FitlogError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    FitlogError::InvalidArgument(message)
}

/// Common validation functions.
pub mod rules {
    use chrono::{DateTime, Utc};
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Usernames are 3 to 30 characters of letters, digits, and underscores.
    pub fn valid_username(username: &str) -> Result<(), ValidationError> {
        let len = username.chars().count();
        if !(3..=30).contains(&len) {
            return Err(ValidationError::new("username_length")
                .with_message("Username must be between 3 and 30 characters".into()));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::new("username_invalid_characters").with_message(
                "Username can only contain letters, numbers and underscores".into(),
            ));
        }
        Ok(())
    }

    /// Rejects timestamps later than now.
    pub fn not_in_future(date: &DateTime<Utc>) -> Result<(), ValidationError> {
        if *date > Utc::now() {
            return Err(ValidationError::new("future_date")
                .with_message("Invalid date. Cannot use future times and dates".into()));
        }
        Ok(())
    }
}
