//! # Fitlog Core
//!
//! Core types, domain records, and error definitions for Fitlog.
//! Every other crate in the workspace builds on the error type and the
//! typed identifiers defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
