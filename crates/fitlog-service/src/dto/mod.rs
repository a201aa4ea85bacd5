//! Request and response types for the service layer.

mod auth_dto;
mod common_dto;
mod user_dto;
mod weight_dto;
mod workout_dto;

pub use auth_dto::*;
pub use common_dto::*;
pub use user_dto::*;
pub use weight_dto::*;
pub use workout_dto::*;
