//! Role and ownership checks.

mod checker;

pub use checker::*;
