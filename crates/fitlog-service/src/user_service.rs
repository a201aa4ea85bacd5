//! User service: cached profile reads and admin search, plus account changes.

use crate::cache::{cache_keys, CacheAside};
use crate::dto::{ChangePasswordRequest, ChangeRoleRequest, DeletedResponse, MessageResponse, UpdatedResponse, UserResponse};
use fitlog_config::CacheTtlConfig;
use fitlog_core::{FitlogError, FitlogResult, Interface, UserId, UserRole, ValidateExt};
use fitlog_repository::{UserRepository, UserSearch};
use fitlog_security::{Claims, ClaimsExt, PasswordHasherInterface};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Gets a user by ID. Self or admin.
    async fn get_user(&self, claims: &Claims, id: UserId) -> FitlogResult<UserResponse>;

    /// Searches users by username and email fragments. Admin only.
    async fn search_users(&self, claims: &Claims, search: UserSearch) -> FitlogResult<Vec<UserResponse>>;

    /// Changes the caller's own password.
    async fn change_password(
        &self,
        claims: &Claims,
        id: UserId,
        request: ChangePasswordRequest,
    ) -> FitlogResult<MessageResponse>;

    /// Grants or revokes the admin role. Admin only.
    async fn change_role(&self, claims: &Claims, id: UserId, request: ChangeRoleRequest) -> FitlogResult<UpdatedResponse>;

    /// Deletes an account. Self or admin.
    async fn delete_user(&self, claims: &Claims, id: UserId) -> FitlogResult<DeletedResponse>;
}

/// User service implementation.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    cache: CacheAside,
    ttl: CacheTtlConfig,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: CacheAside,
        ttl: CacheTtlConfig,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_user(&self, claims: &Claims, id: UserId) -> FitlogResult<UserResponse> {
        debug!("Getting user: {}", id);
        claims.require_role_or_owner(UserRole::Admin, id)?;

        let key = cache_keys::user_by_id(id)?;
        let user: Option<UserResponse> = self
            .cache
            .read_through(&key, self.ttl.user_by_id(), || async {
                Ok(self.user_repository.find_by_id(id).await?.map(UserResponse::from))
            })
            .await?;

        user.ok_or_else(|| FitlogError::not_found("User", id))
    }

    async fn search_users(&self, claims: &Claims, search: UserSearch) -> FitlogResult<Vec<UserResponse>> {
        debug!("Searching users: {:?}", search);
        claims.require_admin()?;

        let key = cache_keys::search_users(search.username.as_deref(), search.email.as_deref(), search.window)?;
        self.cache
            .read_through(&key, self.ttl.user_search(), || async {
                let users = self.user_repository.search(&search).await?;
                Ok(users.into_iter().map(UserResponse::from).collect())
            })
            .await
    }

    async fn change_password(
        &self,
        claims: &Claims,
        id: UserId,
        request: ChangePasswordRequest,
    ) -> FitlogResult<MessageResponse> {
        debug!("Changing password for user: {}", id);
        claims.require_owner(id)?;

        request.validate_request()?;
        if request.new_password != request.repeat_password {
            return Err(FitlogError::invalid_argument("Passwords do not match"));
        }

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| FitlogError::not_found("User", id))?;

        if !self.password_hasher.verify(&request.old_password, &user.password_hash)? {
            warn!("Password change rejected for {}: wrong old password", id);
            return Err(FitlogError::InvalidCredentials);
        }

        let new_hash = self.password_hasher.hash(&request.new_password)?;
        self.user_repository.update_password(id, &new_hash).await?;

        info!("Password changed for user: {}", id);
        Ok(MessageResponse::new("Password updated successfully"))
    }

    async fn change_role(&self, claims: &Claims, id: UserId, request: ChangeRoleRequest) -> FitlogResult<UpdatedResponse> {
        claims.require_admin()?;

        let role = match request.admin {
            Some(true) => UserRole::Admin,
            Some(false) => UserRole::User,
            None => return Err(FitlogError::invalid_argument("Type change status invalid")),
        };

        let updated = self.user_repository.set_role(id, role).await?;
        info!("User role updated: {} -> {} ({} row(s))", id, role, updated);
        Ok(UpdatedResponse::new(updated))
    }

    async fn delete_user(&self, claims: &Claims, id: UserId) -> FitlogResult<DeletedResponse> {
        claims.require_role_or_owner(UserRole::Admin, id)?;

        let deleted = self.user_repository.delete(id).await?;
        info!("User deleted: {} ({} row(s))", id, deleted);
        Ok(DeletedResponse::new(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testing::{CountingStore, FailingStore};
    use crate::cache::CacheStore;
    use crate::test_support::{claims, fast_hasher};
    use fitlog_config::OnUnavailable;
    use fitlog_core::{SkipLimit, User};
    use fitlog_repository::memory::InMemoryUserRepository;
    use std::time::Duration;

    struct Fixture {
        service: UserServiceImpl,
        repo: Arc<InMemoryUserRepository>,
        store: Arc<CountingStore>,
        user: User,
    }

    fn fixture() -> Fixture {
        let hasher = fast_hasher();
        let user = User::new(
            "lifter".to_string(),
            "lifter@example.com",
            hasher.hash("password123").unwrap(),
            Some(75),
        );
        let repo = Arc::new(InMemoryUserRepository::with_users([user.clone()]));
        let store = Arc::new(CountingStore::new());
        let cache = CacheAside::new(store.clone(), OnUnavailable::Fail);
        let service = UserServiceImpl::new(repo.clone(), hasher, cache, CacheTtlConfig::default());
        Fixture {
            service,
            repo,
            store,
            user,
        }
    }

    #[tokio::test]
    async fn test_get_user_fills_cache_with_default_ttl() {
        let f = fixture();
        let caller = claims(f.user.id, UserRole::User);

        let first = f.service.get_user(&caller, f.user.id).await.unwrap();
        assert_eq!(first.username, "lifter");
        assert_eq!(
            f.store.sets(),
            vec![(format!("getUserById-{}", f.user.id), Duration::from_secs(1800))]
        );

        // Served from the cache even after the row is gone.
        f.repo.delete(f.user.id).await.unwrap();
        let second = f.service.get_user(&caller, f.user.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(f.store.sets().len(), 1);
    }

    #[tokio::test]
    async fn test_cached_user_never_holds_password_hash() {
        let f = fixture();
        f.service.get_user(&claims(f.user.id, UserRole::User), f.user.id).await.unwrap();

        let raw = f.store.inner.fetch(&format!("getUserById-{}", f.user.id)).await.unwrap().unwrap();
        assert!(!raw.contains(&f.user.password_hash));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found_and_not_cached() {
        let f = fixture();
        let missing = UserId::new();

        let err = f.service.get_user(&claims(missing, UserRole::User), missing).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(f.store.sets().is_empty());
    }

    #[tokio::test]
    async fn test_get_other_user_requires_admin() {
        let f = fixture();
        let stranger = claims(UserId::new(), UserRole::User);
        assert_eq!(f.service.get_user(&stranger, f.user.id).await.unwrap_err().status_code(), 403);

        let admin = claims(UserId::new(), UserRole::Admin);
        assert!(f.service.get_user(&admin, f.user.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_search_is_not_cached() {
        let f = fixture();
        let admin = claims(UserId::new(), UserRole::Admin);
        let search = UserSearch {
            username: Some("nobody".to_string()),
            ..UserSearch::default()
        };

        let results = f.service.search_users(&admin, search).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(f.store.fetches(), 1);
        assert!(f.store.sets().is_empty());
    }

    #[tokio::test]
    async fn test_default_search_key() {
        let f = fixture();
        let admin = claims(UserId::new(), UserRole::Admin);
        let search = UserSearch {
            window: SkipLimit::new(0, SkipLimit::SEARCH_DEFAULT_LIMIT),
            ..UserSearch::default()
        };

        let results = f.service.search_users(&admin, search).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(f.store.sets()[0].0, "searchUsers-undefined-undefined-0-50");
    }

    #[tokio::test]
    async fn test_search_requires_admin() {
        let f = fixture();
        let err = f
            .service
            .search_users(&claims(f.user.id, UserRole::User), UserSearch::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(f.store.fetches(), 0);
    }

    #[tokio::test]
    async fn test_cache_outage_fails_the_read() {
        let f = fixture();
        let cache = CacheAside::new(Arc::new(FailingStore::unreachable()), OnUnavailable::Fail);
        let service = UserServiceImpl::new(f.repo.clone(), fast_hasher(), cache, CacheTtlConfig::default());

        let err = service.get_user(&claims(f.user.id, UserRole::User), f.user.id).await.unwrap_err();
        assert_eq!(err.error_code(), "CACHE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_change_password() {
        let f = fixture();
        let caller = claims(f.user.id, UserRole::User);
        let request = |old: &str, new: &str, repeat: &str| ChangePasswordRequest {
            old_password: old.to_string(),
            new_password: new.to_string(),
            repeat_password: repeat.to_string(),
        };

        let err = f
            .service
            .change_password(&caller, f.user.id, request("password123", "newpassword1", "newpassword2"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = f
            .service
            .change_password(&caller, f.user.id, request("wrong-password", "newpassword1", "newpassword1"))
            .await
            .unwrap_err();
        assert!(matches!(err, FitlogError::InvalidCredentials));

        let response = f
            .service
            .change_password(&caller, f.user.id, request("password123", "newpassword1", "newpassword1"))
            .await
            .unwrap();
        assert_eq!(response.message, "Password updated successfully");

        let stored = f.repo.find_by_id(f.user.id).await.unwrap().unwrap();
        assert!(fast_hasher().verify("newpassword1", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_admin_cannot_change_someone_elses_password() {
        let f = fixture();
        let admin = claims(UserId::new(), UserRole::Admin);
        let request = ChangePasswordRequest {
            old_password: "password123".to_string(),
            new_password: "newpassword1".to_string(),
            repeat_password: "newpassword1".to_string(),
        };
        assert_eq!(
            f.service.change_password(&admin, f.user.id, request).await.unwrap_err().status_code(),
            403
        );
    }

    #[tokio::test]
    async fn test_change_role() {
        let f = fixture();
        let admin = claims(UserId::new(), UserRole::Admin);

        let err = f
            .service
            .change_role(&admin, f.user.id, ChangeRoleRequest { admin: None })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Type change status invalid");

        let response = f
            .service
            .change_role(&admin, f.user.id, ChangeRoleRequest { admin: Some(true) })
            .await
            .unwrap();
        assert_eq!(response.message, "Updated docs: 1");
        assert!(f.repo.find_by_id(f.user.id).await.unwrap().unwrap().is_admin());

        let user = claims(f.user.id, UserRole::User);
        assert!(f
            .service
            .change_role(&user, f.user.id, ChangeRoleRequest { admin: Some(true) })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let f = fixture();
        let response = f.service.delete_user(&claims(f.user.id, UserRole::User), f.user.id).await.unwrap();
        assert_eq!(response.message, "Deleted docs: 1");
        assert!(f.repo.is_empty());

        let again = f.service.delete_user(&claims(f.user.id, UserRole::User), f.user.id).await.unwrap();
        assert_eq!(again.deleted, 0);
    }
}
