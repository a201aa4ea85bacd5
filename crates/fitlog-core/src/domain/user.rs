//! User record.

use super::UserRole;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username, compared case-insensitively.
    pub username: String,

    /// Lower-cased email address.
    pub email: String,

    /// Hashed password (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// User's role.
    pub role: UserRole,

    /// Target body weight, if the user set one.
    pub target: Option<u32>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a regular user.
    #[must_use]
    pub fn new(username: String, email: &str, password_hash: String, target: Option<u32>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email: email.to_lowercase(),
            password_hash,
            role: UserRole::User,
            target,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}
