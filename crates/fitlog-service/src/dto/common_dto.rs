//! Response bodies and parsing helpers shared by several resources.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
    pub deleted: u64,
}

impl DeletedResponse {
    #[must_use]
    pub fn new(deleted: u64) -> Self {
        Self {
            message: format!("Deleted docs: {deleted}"),
            deleted,
        }
    }
}

/// Result of an in-place update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedResponse {
    pub message: String,
    pub updated: u64,
}

impl UpdatedResponse {
    #[must_use]
    pub fn new(updated: u64) -> Self {
        Self {
            message: format!("Updated docs: {updated}"),
            updated,
        }
    }
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Floors a JSON number to a whole count. Negative, NaN and out-of-range
/// values yield `None`.
#[must_use]
pub fn floor_count(value: f64) -> Option<u32> {
    let floored = value.floor();
    if floored.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&floored) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(floored as u32)
    } else {
        None
    }
}
