//! Value objects - Immutable objects defined by their attributes

mod audience;
mod dice;
mod roll_config;
mod success;

pub use audience::{Audience, Requester};
pub use dice::{DiceError, DieRequest, DieResult, DrawRange, ResolvedBatch, RollPlan};
pub use roll_config::RollConfig;
pub use success::{classify, ScoringRule, SuccessTier};
