//! # Fitlog Security
//!
//! JWT access/refresh tokens, Argon2 password hashing, and role checks.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::*;
pub use password::*;
pub use rbac::*;
