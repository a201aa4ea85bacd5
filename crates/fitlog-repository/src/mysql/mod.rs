//! MySQL repository implementations.

mod user_repository;
mod weight_repository;
mod workout_repository;

pub use user_repository::*;
pub use weight_repository::*;
pub use workout_repository::*;

use fitlog_core::FitlogError;
use uuid::Uuid;

/// MySQL stores UUIDs as CHAR(36).
fn parse_uuid(raw: &str) -> Result<Uuid, FitlogError> {
    Uuid::parse_str(raw).map_err(|e| FitlogError::Internal(format!("Invalid UUID in database: {e}")))
}

/// Escapes `%`, `_` and `\` so user input matches literally inside LIKE.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
