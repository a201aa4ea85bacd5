//! Authentication service implementation.

use crate::dto::{floor_count, Issued, LoginRequest, SignupRequest, SignupResponse, TokenResponse};
use fitlog_core::{FitlogError, FitlogResult, Interface, User, ValidateExt};
use fitlog_repository::UserRepository;
use fitlog_security::{Claims, PasswordHasherInterface, TokenProvider};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Creates an account and issues its first token pair.
    async fn signup(&self, request: SignupRequest) -> FitlogResult<Issued<SignupResponse>>;

    /// Logs in a user.
    async fn login(&self, request: LoginRequest) -> FitlogResult<Issued<TokenResponse>>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh(&self, refresh_token: Option<&str>) -> FitlogResult<TokenResponse>;

    /// Validates an access token and returns claims.
    async fn validate_token(&self, token: &str) -> FitlogResult<Claims>;

    /// Lifetime of the refresh cookie.
    fn refresh_lifetime(&self) -> Duration;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    token_provider: Arc<TokenProvider>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn signup(&self, request: SignupRequest) -> FitlogResult<Issued<SignupResponse>> {
        debug!("Signing up user: {}", request.username);

        request.validate_request()?;

        if request.password != request.password_repeat {
            return Err(FitlogError::invalid_argument("Passwords do not match"));
        }

        if self.user_repository.exists_by_username(&request.username).await? {
            return Err(FitlogError::conflict("Username already exists"));
        }

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(FitlogError::conflict("Email already exists"));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = User::new(
            request.username,
            &request.email,
            password_hash,
            request.target.and_then(floor_count),
        );

        let saved_user = self.user_repository.save(&user).await?;
        let tokens = self
            .token_provider
            .generate_tokens(saved_user.id, &saved_user.username, saved_user.role)?;

        info!("User signed up: {}", saved_user.id);
        Ok(Issued {
            body: SignupResponse {
                message: "User created".to_string(),
                id: saved_user.id,
                token: tokens.access_token,
            },
            refresh_token: tokens.refresh_token,
        })
    }

    async fn login(&self, request: LoginRequest) -> FitlogResult<Issued<TokenResponse>> {
        debug!("Login attempt for: {}", request.username);

        request.validate_request()?;

        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username {}", request.username);
                FitlogError::InvalidCredentials
            })?;

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            warn!("Login failed: wrong password for {}", user.id);
            return Err(FitlogError::InvalidCredentials);
        }

        let tokens = self.token_provider.generate_tokens(user.id, &user.username, user.role)?;

        info!("User logged in: {}", user.id);
        Ok(Issued {
            body: TokenResponse {
                username: user.username,
                token: tokens.access_token,
            },
            refresh_token: tokens.refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: Option<&str>) -> FitlogResult<TokenResponse> {
        let rejected = || FitlogError::unauthorized("Refresh unsuccessful");

        let token = refresh_token.filter(|t| !t.is_empty()).ok_or_else(rejected)?;
        let claims = self.token_provider.validate_refresh_token(token).map_err(|e| {
            warn!("Refresh rejected: {}", e);
            rejected()
        })?;

        // The account may have been deleted or had its role changed since the
        // refresh token was issued.
        let user = self
            .user_repository
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| {
                warn!("Refresh rejected: user {} no longer exists", claims.id);
                rejected()
            })?;

        let token = self
            .token_provider
            .generate_access_token(user.id, &user.username, user.role)?;

        debug!("Access token refreshed for {}", user.id);
        Ok(TokenResponse {
            username: user.username,
            token,
        })
    }

    async fn validate_token(&self, token: &str) -> FitlogResult<Claims> {
        self.token_provider.validate_access_token(token)
    }

    fn refresh_lifetime(&self) -> Duration {
        self.token_provider.refresh_lifetime()
    }
}
