//! Core types and utilities

pub mod unit_system;
pub mod units;

pub use unit_system::{UnitSystem, SECONDS_PER_MINUTE};
pub use units::*;
