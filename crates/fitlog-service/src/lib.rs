//! # Fitlog Service
//!
//! Business logic for Fitlog. Every resource read goes through the
//! cache-aside accessor in [`cache`]; writes go straight to the repositories
//! and never touch the cache.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod user_service;
pub mod weight_service;
pub mod workout_service;

#[cfg(test)]
mod test_support;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use user_service::*;
pub use weight_service::*;
pub use workout_service::*;
