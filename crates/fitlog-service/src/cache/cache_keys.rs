//! Cache key derivation.
//!
//! A key is the operation prefix followed by the parameter values in the
//! order the caller supplies them, all joined with `-`:
//!
//! ```text
//! searchUsers-undefined-undefined-0-50
//! getUserById-0190c4e2-7d5a-7c3e-9f1b-3a2d4c5e6f70
//! ```
//!
//! Values are not escaped, so a value containing `-` can make two different
//! parameter lists produce the same key.

use chrono::{DateTime, SecondsFormat, Utc};
use fitlog_core::{FitlogError, FitlogResult, SkipLimit, UserId, WeightId, WorkoutId};
use fitlog_repository::WeightQuery;
use std::fmt;
use uuid::Uuid;

/// Separator between the prefix and each value.
pub const KEY_DELIMITER: char = '-';

/// Rendering of an absent optional value.
pub const ABSENT_VALUE: &str = "undefined";

pub const GET_USER_BY_ID: &str = "getUserById";
pub const SEARCH_USERS: &str = "searchUsers";
pub const GET_WORKOUT_BY_ID: &str = "getWorkoutById";
pub const GET_USERS_WORKOUTS: &str = "getUsersWorkouts";
pub const GET_WEIGHT_DATA_BY_ID: &str = "getWeightDataById";
pub const GET_WEIGHT_DATA: &str = "getWeightData";

/// A derived cache key. Only [`build_key`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Absent,
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            // f64's Display drops a zero fraction, so 1.0 renders as "1"
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Absent => f.write_str(ABSENT_VALUE),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for KeyValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for KeyValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<u32> for KeyValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<f64> for KeyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Uuid> for KeyValue {
    fn from(value: Uuid) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<UserId> for KeyValue {
    fn from(value: UserId) -> Self {
        value.into_inner().into()
    }
}

impl From<WorkoutId> for KeyValue {
    fn from(value: WorkoutId) -> Self {
        value.into_inner().into()
    }
}

impl From<WeightId> for KeyValue {
    fn from(value: WeightId) -> Self {
        value.into_inner().into()
    }
}

impl From<DateTime<Utc>> for KeyValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Str(value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<T: Into<KeyValue>> From<Option<T>> for KeyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Ordered `(name, value)` pairs. The names document the key layout; only
/// the values appear in the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyParams(Vec<(&'static str, KeyValue)>);

impl KeyParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<KeyValue>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    pub fn values(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter().map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds a key from an operation prefix and its ordered parameters.
///
/// An empty parameter list still appends the delimiter (`"prefix-"`).
pub fn build_key(prefix: &str, params: &KeyParams) -> FitlogResult<CacheKey> {
    if prefix.is_empty() {
        return Err(FitlogError::invalid_argument("Missing cache key prefix"));
    }

    let values = params.values().map(ToString::to_string).collect::<Vec<_>>();
    let mut key = String::with_capacity(prefix.len() + 1 + values.iter().map(|v| v.len() + 1).sum::<usize>());
    key.push_str(prefix);
    key.push(KEY_DELIMITER);
    key.push_str(&values.join(&KEY_DELIMITER.to_string()));

    Ok(CacheKey(key))
}

/// `getUserById-{userId}`
pub fn user_by_id(user_id: UserId) -> FitlogResult<CacheKey> {
    build_key(GET_USER_BY_ID, &KeyParams::new().with("userId", user_id))
}

/// `searchUsers-{username}-{email}-{skip}-{limit}`
pub fn search_users(username: Option<&str>, email: Option<&str>, window: SkipLimit) -> FitlogResult<CacheKey> {
    build_key(
        SEARCH_USERS,
        &KeyParams::new()
            .with("username", username)
            .with("email", email)
            .with("skip", window.skip)
            .with("limit", window.limit),
    )
}

/// `getWorkoutById-{workoutId}`
pub fn workout_by_id(workout_id: WorkoutId) -> FitlogResult<CacheKey> {
    build_key(GET_WORKOUT_BY_ID, &KeyParams::new().with("workoutId", workout_id))
}

/// `getUsersWorkouts-{userId}-{limit}`
pub fn users_workouts(user_id: UserId, limit: u32) -> FitlogResult<CacheKey> {
    build_key(
        GET_USERS_WORKOUTS,
        &KeyParams::new().with("userId", user_id).with("limit", limit),
    )
}

/// `getWeightDataById-{weightId}`
pub fn weight_by_id(weight_id: WeightId) -> FitlogResult<CacheKey> {
    build_key(GET_WEIGHT_DATA_BY_ID, &KeyParams::new().with("weightId", weight_id))
}

/// `getWeightData-{userId}-{dateStart}-{dateEnd}-{skip}-{limit}`
pub fn weight_list(query: &WeightQuery) -> FitlogResult<CacheKey> {
    build_key(
        GET_WEIGHT_DATA,
        &KeyParams::new()
            .with("userId", query.user_id)
            .with("dateStart", query.date_start)
            .with("dateEnd", query.date_end)
            .with("skip", query.window.skip)
            .with("limit", query.window.limit),
    )
}
