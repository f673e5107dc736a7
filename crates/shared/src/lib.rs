//! Sheetroll Shared - wire types for the engine and its clients
//!
//! This crate contains the types exchanged between the engine and the sheet
//! platform's browser clients (player sheet, admin console, portrait overlay):
//! - Roll request/response bodies for `POST /api/dice`
//! - Room addressing for the pub/sub layer
//! - WebSocket message types (ClientMessage, ServerMessage)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and the domain crate
//! 2. **No business logic** - Pure data types, serialization, and validation at the edge

pub mod dice;
pub mod messages;
pub mod rooms;

pub use dice::{DiceRollRequest, DiceRollResponse, DieSpec, Numeric};
pub use messages::{ClientMessage, ServerMessage};
pub use rooms::Room;
