//! Use cases - User story orchestration.
//!
//! Use cases orchestrate the domain rules and the infrastructure ports to
//! fulfill a user story.

pub mod dice;

pub use dice::DiceUseCases;
