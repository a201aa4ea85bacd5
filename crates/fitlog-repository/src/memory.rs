//! In-process repositories backed by hash maps.
//!
//! These mirror the ordering and filtering of the MySQL repositories so
//! service and HTTP tests can run without a database.

use crate::{UserRepository, UserSearch, WeightQuery, WeightRepository, WorkoutRepository};
use async_trait::async_trait;
use chrono::Utc;
use fitlog_core::{
    FitlogError, FitlogResult, User, UserId, UserRole, Weight, WeightId, WeightUpdate, Workout, WorkoutId,
};
use parking_lot::RwLock;
use std::collections::HashMap;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Hash-map backed user repository.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `users`.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.users.write();
            for user in users {
                map.insert(user.id, user);
            }
        }
        repo
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> FitlogResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> FitlogResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> FitlogResult<bool> {
        Ok(self.users.read().values().any(|u| u.username.eq_ignore_ascii_case(username)))
    }

    async fn exists_by_email(&self, email: &str) -> FitlogResult<bool> {
        Ok(self.users.read().values().any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn search(&self, search: &UserSearch) -> FitlogResult<Vec<User>> {
        let mut matches: Vec<User> = self
            .users
            .read()
            .values()
            .filter(|u| search.username.as_deref().map_or(true, |q| contains_ignore_case(&u.username, q)))
            .filter(|u| search.email.as_deref().map_or(true, |q| contains_ignore_case(&u.email, q)))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(matches
            .into_iter()
            .skip(search.window.offset() as usize)
            .take(search.window.limit as usize)
            .collect())
    }

    async fn save(&self, user: &User) -> FitlogResult<User> {
        let mut users = self.users.write();
        let duplicate = users.values().any(|u| {
            u.id != user.id
                && (u.username.eq_ignore_ascii_case(&user.username) || u.email.eq_ignore_ascii_case(&user.email))
        });
        if duplicate {
            return Err(FitlogError::conflict("Duplicate entry for users"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> FitlogResult<u64> {
        Ok(self.users.write().get_mut(&id).map_or(0, |user| {
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
            1
        }))
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> FitlogResult<u64> {
        Ok(self.users.write().get_mut(&id).map_or(0, |user| {
            user.role = role;
            user.updated_at = Utc::now();
            1
        }))
    }

    async fn delete(&self, id: UserId) -> FitlogResult<u64> {
        Ok(u64::from(self.users.write().remove(&id).is_some()))
    }
}

/// Hash-map backed workout repository.
#[derive(Debug, Default)]
pub struct InMemoryWorkoutRepository {
    workouts: RwLock<HashMap<WorkoutId, Workout>>,
}

impl InMemoryWorkoutRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_workouts(workouts: impl IntoIterator<Item = Workout>) -> Self {
        let repo = Self::new();
        repo.workouts.write().extend(workouts.into_iter().map(|w| (w.id, w)));
        repo
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryWorkoutRepository {
    async fn find_by_id(&self, id: WorkoutId) -> FitlogResult<Option<Workout>> {
        Ok(self.workouts.read().get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId, limit: u32) -> FitlogResult<Vec<Workout>> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .read()
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        workouts.truncate(limit as usize);
        Ok(workouts)
    }

    async fn save(&self, workout: &Workout) -> FitlogResult<Workout> {
        self.workouts.write().insert(workout.id, workout.clone());
        Ok(workout.clone())
    }

    async fn delete(&self, id: WorkoutId) -> FitlogResult<u64> {
        Ok(u64::from(self.workouts.write().remove(&id).is_some()))
    }
}

/// Hash-map backed weight entry repository.
#[derive(Debug, Default)]
pub struct InMemoryWeightRepository {
    entries: RwLock<HashMap<WeightId, Weight>>,
}

impl InMemoryWeightRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = Weight>) -> Self {
        let repo = Self::new();
        repo.entries.write().extend(entries.into_iter().map(|w| (w.id, w)));
        repo
    }
}

#[async_trait]
impl WeightRepository for InMemoryWeightRepository {
    async fn find_by_id(&self, id: WeightId) -> FitlogResult<Option<Weight>> {
        Ok(self.entries.read().get(&id).cloned())
    }

    async fn find_by_user(&self, query: &WeightQuery) -> FitlogResult<Vec<Weight>> {
        let mut entries: Vec<Weight> = self
            .entries
            .read()
            .values()
            .filter(|w| w.user_id == query.user_id)
            .filter(|w| query.date_start.map_or(true, |start| w.date >= start))
            .filter(|w| query.date_end.map_or(true, |end| w.date <= end))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(entries
            .into_iter()
            .skip(query.window.offset() as usize)
            .take(query.window.limit as usize)
            .collect())
    }

    async fn save(&self, weight: &Weight) -> FitlogResult<Weight> {
        self.entries.write().insert(weight.id, weight.clone());
        Ok(weight.clone())
    }

    async fn update(&self, id: WeightId, update: WeightUpdate) -> FitlogResult<Option<Weight>> {
        Ok(self.entries.write().get_mut(&id).map(|entry| {
            update.apply(entry);
            entry.clone()
        }))
    }

    async fn delete(&self, id: WeightId) -> FitlogResult<u64> {
        Ok(u64::from(self.entries.write().remove(&id).is_some()))
    }
}
