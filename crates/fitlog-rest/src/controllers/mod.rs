//! REST API controllers.

pub mod auth_controller;
pub mod health_controller;
pub mod user_controller;
pub mod weight_controller;
pub mod workout_controller;

pub use health_controller::*;
