//! # Fitlog REST
//!
//! HTTP surface for Fitlog built on Axum: authentication with a refresh
//! cookie, users, workouts, weight entries, and health checks. Every API
//! response is wrapped in the `{ success, data | error }` envelope.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
