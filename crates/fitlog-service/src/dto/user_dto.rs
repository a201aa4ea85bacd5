//! User-related DTOs.

use chrono::{DateTime, Utc};
use fitlog_core::{parse_count, SkipLimit, User, UserId, UserRole};
use fitlog_repository::UserSearch;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub target: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            target: user.target,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Query string of the admin user search. Values are kept raw so malformed
/// counts can fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    /// Case-insensitive username fragment.
    pub username: Option<String>,
    /// Case-insensitive email fragment.
    pub email: Option<String>,
    /// Rows to skip (default 0).
    pub skip: Option<String>,
    /// Rows to return (default 50, max 100).
    pub limit: Option<String>,
}

impl UserSearchQuery {
    /// Normalizes the query. Blank filters count as absent.
    #[must_use]
    pub fn normalize(&self) -> UserSearch {
        let filter = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        UserSearch {
            username: filter(&self.username),
            email: filter(&self.email),
            window: SkipLimit::from_query(
                self.skip.as_deref(),
                self.limit.as_deref(),
                SkipLimit::SEARCH_DEFAULT_LIMIT,
            ),
        }
    }
}

/// Query string of a user's workout list.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkoutListQuery {
    /// Rows to return (default 20, max 100).
    pub limit: Option<String>,
}

impl WorkoutListQuery {
    #[must_use]
    pub fn limit(&self) -> u32 {
        parse_count(self.limit.as_deref())
            .unwrap_or(SkipLimit::DEFAULT_LIMIT)
            .min(SkipLimit::MAX_LIMIT)
    }
}

/// Request to change one's own password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub new_password: String,

    pub repeat_password: String,
}

/// Request to grant or revoke the admin role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    /// `true` grants admin, `false` revokes it.
    pub admin: Option<bool>,
}
