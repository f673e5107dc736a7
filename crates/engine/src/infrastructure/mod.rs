//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod ports;
pub mod random;
pub mod random_org;
pub mod resilient_random;
pub mod settings;
