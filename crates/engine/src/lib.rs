//! Sheetroll Engine library.
//!
//! Server-side dice resolution for the character sheet platform: rolls are
//! resolved against a remote true-random service with a local fallback,
//! optionally classified into success tiers, and broadcast to the rooms that
//! watch the rolling player.
//!
//! ## Structure
//!
//! - `use_cases/` - Roll orchestration (resolve, classify, broadcast)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
