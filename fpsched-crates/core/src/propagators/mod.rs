//! Contains the propagator implementations.
pub mod fixed_priority;

pub use fixed_priority::*;
