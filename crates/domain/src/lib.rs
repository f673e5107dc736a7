//! Sheetroll Domain - value objects for the dice-roll engine.
//!
//! Everything here is pure: no I/O, no async, no random number generation.
//! The engine plans draws through [`DieRequest::plan`] and performs them behind
//! its own ports.

pub mod error;
pub mod ids;
pub mod value_objects;

pub use error::DomainError;
pub use ids::PlayerId;

pub use value_objects::{
    classify, Audience, DiceError, DieRequest, DieResult, DrawRange, Requester, ResolvedBatch,
    RollConfig, RollPlan, ScoringRule, SuccessTier,
};
