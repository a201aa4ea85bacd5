//! Repository trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitlog_core::{
    FitlogResult, Interface, SkipLimit, User, UserId, UserRole, Weight, WeightId, WeightUpdate, Workout, WorkoutId,
};

/// Filters for the admin user search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearch {
    /// Case-insensitive substring of the username.
    pub username: Option<String>,
    /// Case-insensitive substring of the email.
    pub email: Option<String>,
    pub window: SkipLimit,
}

/// Filters for a user's weight entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightQuery {
    pub user_id: UserId,
    /// Inclusive lower bound on the entry date.
    pub date_start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the entry date.
    pub date_end: Option<DateTime<Utc>>,
    pub window: SkipLimit,
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> FitlogResult<Option<User>>;

    /// Finds a user by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> FitlogResult<Option<User>>;

    /// Checks if a username exists, ignoring case.
    async fn exists_by_username(&self, username: &str) -> FitlogResult<bool>;

    /// Checks if an email exists, ignoring case.
    async fn exists_by_email(&self, email: &str) -> FitlogResult<bool>;

    /// Lists users matching the filters, ordered by username.
    async fn search(&self, search: &UserSearch) -> FitlogResult<Vec<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> FitlogResult<User>;

    /// Replaces a user's password hash. Returns the number of rows changed.
    async fn update_password(&self, id: UserId, password_hash: &str) -> FitlogResult<u64>;

    /// Changes a user's role. Returns the number of rows changed.
    async fn set_role(&self, id: UserId, role: UserRole) -> FitlogResult<u64>;

    /// Deletes a user by ID. Returns the number of rows deleted.
    async fn delete(&self, id: UserId) -> FitlogResult<u64>;
}

/// Workout repository trait.
#[async_trait]
pub trait WorkoutRepository: Interface + Send + Sync {
    /// Finds a workout by ID.
    async fn find_by_id(&self, id: WorkoutId) -> FitlogResult<Option<Workout>>;

    /// Lists a user's workouts, newest first.
    async fn find_by_user(&self, user_id: UserId, limit: u32) -> FitlogResult<Vec<Workout>>;

    /// Saves a new workout.
    async fn save(&self, workout: &Workout) -> FitlogResult<Workout>;

    /// Deletes a workout by ID. Returns the number of rows deleted.
    async fn delete(&self, id: WorkoutId) -> FitlogResult<u64>;
}

/// Weight entry repository trait.
#[async_trait]
pub trait WeightRepository: Interface + Send + Sync {
    /// Finds an entry by ID.
    async fn find_by_id(&self, id: WeightId) -> FitlogResult<Option<Weight>>;

    /// Lists a user's entries, most recent `date` first.
    async fn find_by_user(&self, query: &WeightQuery) -> FitlogResult<Vec<Weight>>;

    /// Saves a new entry.
    async fn save(&self, weight: &Weight) -> FitlogResult<Weight>;

    /// Applies a partial update, returning the updated entry if it exists.
    async fn update(&self, id: WeightId, update: WeightUpdate) -> FitlogResult<Option<Weight>>;

    /// Deletes an entry by ID. Returns the number of rows deleted.
    async fn delete(&self, id: WeightId) -> FitlogResult<u64>;
}
