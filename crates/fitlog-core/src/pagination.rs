//! Skip/limit pagination for list operations.

use serde::{Deserialize, Serialize};

/// A window into a list result, expressed as rows to skip and rows to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipLimit {
    /// Rows to skip.
    pub skip: u32,
    /// Maximum rows to return.
    pub limit: u32,
}

impl SkipLimit {
    /// The default list size for weight and workout lists.
    pub const DEFAULT_LIMIT: u32 = 20;
    /// The default list size for user search.
    pub const SEARCH_DEFAULT_LIMIT: u32 = 50;
    /// The maximum allowed list size.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a window, capping the limit at [`Self::MAX_LIMIT`].
    #[must_use]
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit: limit.min(Self::MAX_LIMIT),
        }
    }

    /// Builds a window from raw query-string values.
    ///
    /// Values that are not plain decimal digits fall back to the defaults,
    /// so `?skip=-1&limit=abc` behaves like an empty query.
    #[must_use]
    pub fn from_query(skip: Option<&str>, limit: Option<&str>, default_limit: u32) -> Self {
        Self::new(
            parse_count(skip).unwrap_or(0),
            parse_count(limit).unwrap_or(default_limit),
        )
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.skip
    }
}

impl Default for SkipLimit {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Parses a non-negative count made only of ASCII digits.
#[must_use]
pub fn parse_count(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults() {
        let window = SkipLimit::from_query(None, None, SkipLimit::SEARCH_DEFAULT_LIMIT);
        assert_eq!(window, SkipLimit { skip: 0, limit: 50 });
    }

    #[test]
    fn test_from_query_parses_digits() {
        let window = SkipLimit::from_query(Some("10"), Some("5"), SkipLimit::DEFAULT_LIMIT);
        assert_eq!(window.skip, 10);
        assert_eq!(window.limit, 5);
        assert_eq!(window.offset(), 10);
    }

    #[test]
    fn test_from_query_rejects_non_digits() {
        let window = SkipLimit::from_query(Some("-3"), Some("1e3"), SkipLimit::DEFAULT_LIMIT);
        assert_eq!(window, SkipLimit::default());
    }

    #[test]
    fn test_limit_is_capped() {
        let window = SkipLimit::from_query(None, Some("5000"), SkipLimit::DEFAULT_LIMIT);
        assert_eq!(window.limit, SkipLimit::MAX_LIMIT);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("42")), Some(42));
        assert_eq!(parse_count(Some(" 7 ")), Some(7));
        assert_eq!(parse_count(Some("")), None);
        assert_eq!(parse_count(Some("4.5")), None);
        assert_eq!(parse_count(None), None);
    }
}
