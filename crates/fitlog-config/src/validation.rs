//! Configuration validation module.
//!
//! Collects every problem in a loaded configuration so startup can report
//! them together instead of one at a time.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// JWT secret is too short.
    JwtSecretTooShort { name: String, actual: usize, minimum: usize },
    /// Access and refresh tokens must be signed with different secrets.
    SharedJwtSecret,
    /// Port number is invalid.
    InvalidPort { value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// A duration must be positive.
    NonPositiveDuration { name: String },
    /// Password hash cost is invalid.
    InvalidHashCost { value: u32, minimum: u32, maximum: u32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JwtSecretTooShort { name, actual, minimum } => {
                write!(f, "{name} too short: {actual} characters (minimum {minimum})")
            }
            Self::SharedJwtSecret => {
                write!(f, "jwt_secret and jwt_refresh_secret must differ")
            }
            Self::InvalidPort { value } => {
                write!(f, "Invalid server port: {value} (must be 1-65535)")
            }
            Self::InvalidPoolSize { min, max } => {
                write!(f, "Invalid pool size: min ({min}) cannot be greater than max ({max})")
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {value} exceeds maximum allowed ({maximum})")
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {url_type} URL: {message}")
            }
            Self::NonPositiveDuration { name } => {
                write!(f, "'{name}' must be positive")
            }
            Self::InvalidHashCost { value, minimum, maximum } => {
                write!(
                    f,
                    "Invalid password hash cost: {value} (must be between {minimum} and {maximum})"
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{value}' (valid: trace, debug, info, warn, error)"
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum JWT secret length.
    const MIN_JWT_SECRET_LENGTH: usize = 32;
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Minimum Argon2 memory cost in MiB.
    const MIN_HASH_COST: u32 = 4;
    /// Maximum Argon2 memory cost in MiB.
    const MAX_HASH_COST: u32 = 31;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_security(&config.security, &mut errors);
        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_redis(&config.redis, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_security(config: &crate::SecurityConfig, errors: &mut Vec<ConfigValidationError>) {
        for (name, secret) in [
            ("jwt_secret", &config.jwt_secret),
            ("jwt_refresh_secret", &config.jwt_refresh_secret),
        ] {
            if secret.len() < Self::MIN_JWT_SECRET_LENGTH {
                errors.push(ConfigValidationError::JwtSecretTooShort {
                    name: name.to_string(),
                    actual: secret.len(),
                    minimum: Self::MIN_JWT_SECRET_LENGTH,
                });
            }
        }

        if config.jwt_secret == config.jwt_refresh_secret {
            errors.push(ConfigValidationError::SharedJwtSecret);
        }

        if !(Self::MIN_HASH_COST..=Self::MAX_HASH_COST).contains(&config.password_hash_cost) {
            errors.push(ConfigValidationError::InvalidHashCost {
                value: config.password_hash_cost,
                minimum: Self::MIN_HASH_COST,
                maximum: Self::MAX_HASH_COST,
            });
        }

        if config.jwt_access_expiration_secs == 0 {
            errors.push(non_positive("security.jwt_access_expiration_secs"));
        }
        if config.jwt_refresh_expiration_secs == 0 {
            errors.push(non_positive("security.jwt_refresh_expiration_secs"));
        }
    }

    fn validate_server(config: &crate::ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort { value: config.port });
        }
        if config.request_timeout_secs == 0 {
            errors.push(non_positive("server.request_timeout_secs"));
        }
    }

    fn validate_database(config: &crate::DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        check_url("database", &config.url, &["mysql"], errors);

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.connect_timeout_secs == 0 {
            errors.push(non_positive("database.connect_timeout_secs"));
        }
        if config.idle_timeout_secs == 0 {
            errors.push(non_positive("database.idle_timeout_secs"));
        }
    }

    fn validate_redis(config: &crate::RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }

        check_url("redis", &config.url, &["redis", "rediss"], errors);

        if config.pool_size > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: config.pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.timeout_secs == 0 {
            errors.push(non_positive("redis.timeout_secs"));
        }
    }

    fn validate_cache(config: &crate::CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        for (name, secs) in config.ttl.entries() {
            if secs == 0 {
                errors.push(non_positive(name));
            }
        }
    }

    fn validate_observability(config: &crate::ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}

fn non_positive(name: &str) -> ConfigValidationError {
    ConfigValidationError::NonPositiveDuration { name: name.to_string() }
}

fn check_url(url_type: &str, raw: &str, schemes: &[&str], errors: &mut Vec<ConfigValidationError>) {
    let message = match Url::parse(raw) {
        Ok(url) if schemes.contains(&url.scheme()) => return,
        Ok(url) => format!(
            "scheme '{}' not supported (expected {})",
            url.scheme(),
            schemes.join(" or ")
        ),
        Err(e) => e.to_string(),
    };
    errors.push(ConfigValidationError::InvalidUrl {
        url_type: url_type.to_string(),
        message,
    });
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
