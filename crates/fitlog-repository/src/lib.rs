//! # Fitlog Repository
//!
//! Data access for users, workouts, and weight entries.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>   (repository interface)
//! MySqlUserRepository            (MySQL / SQLx)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! With the `in-memory` feature, [`memory`] provides hash-map backed
//! implementations of the same traits for tests in dependent crates.

pub mod mysql;
pub mod pool;
pub mod traits;

#[cfg(any(test, feature = "in-memory"))]
pub mod memory;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
