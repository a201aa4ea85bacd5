//! MySQL user repository implementation.

use super::{like_pattern, parse_uuid};
use crate::{traits::UserRepository, DatabasePoolInterface, UserSearch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitlog_core::{FitlogError, FitlogResult, User, UserId, UserRole};
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, target, created_at, updated_at";

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    target: Option<u32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = FitlogError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(parse_uuid(&row.id)?),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role: UserRole::parse(&row.role).unwrap_or_default(),
            target: row.target,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> FitlogResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> FitlogResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(username) = LOWER(?)"
        ))
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> FitlogResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(username) = LOWER(?) LIMIT 1")
            .bind(username)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> FitlogResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) LIMIT 1")
            .bind(email)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn search(&self, search: &UserSearch) -> FitlogResult<Vec<User>> {
        debug!(
            "Searching users: username={:?}, email={:?}, skip={}, limit={}",
            search.username, search.email, search.window.skip, search.window.limit
        );

        let mut query = QueryBuilder::<MySql>::new(format!("SELECT {USER_COLUMNS} FROM users WHERE 1 = 1"));
        if let Some(username) = &search.username {
            query.push(" AND LOWER(username) LIKE LOWER(").push_bind(like_pattern(username)).push(")");
        }
        if let Some(email) = &search.email {
            query.push(" AND LOWER(email) LIKE LOWER(").push_bind(like_pattern(email)).push(")");
        }
        query
            .push(" ORDER BY username LIMIT ")
            .push_bind(search.window.limit)
            .push(" OFFSET ")
            .push_bind(search.window.offset());

        let rows = query
            .build_query_as::<UserRow>()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn save(&self, user: &User) -> FitlogResult<User> {
        debug!("Saving user: {}", user.username);

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, role, target, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.target)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(user.clone())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> FitlogResult<u64> {
        debug!("Updating password for user: {}", id);

        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> FitlogResult<u64> {
        debug!("Setting role of user {} to {}", id, role);

        let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: UserId) -> FitlogResult<u64> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}
