//! # Fitlog Server Library
//!
//! Composition root and startup utilities for the Fitlog server binary.

pub mod di;
pub mod startup;
