//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenType};
use chrono::{Duration, Utc};
use fitlog_config::SecurityConfig;
use fitlog_core::{FitlogError, FitlogResult, UserId, UserRole};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
}

/// Keys for one token type.
#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// JWT token provider service.
///
/// Access and refresh tokens are signed with different secrets, so a
/// refresh token can never be replayed as a bearer token.
#[derive(Clone)]
pub struct TokenProvider {
    access_keys: SigningKeys,
    refresh_keys: SigningKeys,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            access_keys: SigningKeys::from_secret(&config.jwt_secret),
            refresh_keys: SigningKeys::from_secret(&config.jwt_refresh_secret),
            config,
            validation,
        }
    }

    /// Lifetime of a refresh token, used for the cookie max-age.
    #[must_use]
    pub fn refresh_lifetime(&self) -> std::time::Duration {
        self.config.refresh_token_expiration()
    }

    /// Generates a token pair for a user.
    pub fn generate_tokens(&self, user_id: UserId, username: &str, role: UserRole) -> FitlogResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id, username, role)?,
            refresh_token: self.generate_refresh_token(user_id, username, role)?,
        })
    }

    /// Generates an access token.
    pub fn generate_access_token(&self, user_id: UserId, username: &str, role: UserRole) -> FitlogResult<String> {
        self.sign(TokenType::Access, user_id, username, role)
    }

    /// Generates a refresh token.
    pub fn generate_refresh_token(&self, user_id: UserId, username: &str, role: UserRole) -> FitlogResult<String> {
        self.sign(TokenType::Refresh, user_id, username, role)
    }

    fn sign(&self, token_type: TokenType, user_id: UserId, username: &str, role: UserRole) -> FitlogResult<String> {
        let (secs, keys) = match token_type {
            TokenType::Access => (self.config.jwt_access_expiration_secs, &self.access_keys),
            TokenType::Refresh => (self.config.jwt_refresh_expiration_secs, &self.refresh_keys),
        };
        let expires_at = Utc::now() + Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1000));

        let claims = Claims::new(
            token_type,
            user_id,
            username.to_string(),
            role,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| FitlogError::Internal(format!("Failed to generate {token_type} token: {e}")))?;

        debug!("Generated {} token for user {}", token_type, user_id);
        Ok(token)
    }

    fn decode_with(&self, token: &str, keys: &SigningKeys) -> FitlogResult<Claims> {
        let token_data = decode::<Claims>(token, &keys.decoding, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => FitlogError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    FitlogError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => FitlogError::InvalidToken("Invalid token issuer".to_string()),
                ErrorKind::InvalidAudience => FitlogError::InvalidToken("Invalid token audience".to_string()),
                _ => FitlogError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> FitlogResult<Claims> {
        let claims = self.decode_with(token, &self.access_keys)?;

        if !claims.is_access_token() {
            return Err(FitlogError::InvalidToken("Expected access token".to_string()));
        }

        Ok(claims)
    }

    /// Validates a refresh token specifically.
    pub fn validate_refresh_token(&self, token: &str) -> FitlogResult<Claims> {
        let claims = self.decode_with(token, &self.refresh_keys)?;

        if !claims.is_refresh_token() {
            return Err(FitlogError::InvalidToken("Expected refresh token".to_string()));
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
