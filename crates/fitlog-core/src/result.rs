//! Result type aliases for Fitlog.

use crate::FitlogError;

/// A specialized `Result` type for Fitlog operations.
pub type FitlogResult<T> = Result<T, FitlogError>;
