//! Domain records owned by the authoritative store.

pub mod role;
pub mod user;
pub mod weight;
pub mod workout;

pub use role::*;
pub use user::*;
pub use weight::*;
pub use workout::*;
