//! Fixtures shared by the service tests.

use chrono::{Duration, Utc};
use fitlog_config::SecurityConfig;
use fitlog_core::{UserId, UserRole};
use fitlog_security::{Claims, PasswordHasher, PasswordHasherInterface, TokenProvider, TokenType};
use std::sync::Arc;

/// Argon2 with the smallest memory cost, so tests hash quickly.
pub fn fast_hasher() -> Arc<dyn PasswordHasherInterface> {
    Arc::new(PasswordHasher::with_cost(1))
}

pub fn token_provider() -> Arc<TokenProvider> {
    Arc::new(TokenProvider::new(Arc::new(SecurityConfig::default())))
}

/// Access claims for `user_id` without going through a signed token.
pub fn claims(user_id: UserId, role: UserRole) -> Claims {
    Claims::new(
        TokenType::Access,
        user_id,
        "tester".to_string(),
        role,
        "fitlog".to_string(),
        "fitlog-api".to_string(),
        Utc::now() + Duration::hours(1),
    )
}
