//! Custom Axum extractors.

mod claims;
mod json;

pub use claims::*;
pub use json::*;
