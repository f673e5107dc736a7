//! WebSocket message types for engine-client communication
//!
//! Clients (player sheet, admin console, portrait overlay) send ClientMessage
//! to manage room subscriptions; the engine pushes ServerMessage into rooms.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown enum variants deserialize to `Unknown` variant for forward compatibility

use serde::{Deserialize, Serialize};
use sheetroll_domain::{DieResult, PlayerId};

use crate::dice::DieSpec;
use crate::rooms::Room;

// =============================================================================
// Client Messages (Client → Engine)
// =============================================================================

/// Messages from a connected client to the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Subscribe to a room
    JoinRoom { room: Room },
    /// Unsubscribe from a room
    LeaveRoom { room: Room },
    /// Keep-alive
    Heartbeat,
    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Server Messages (Engine → Client)
// =============================================================================

/// Messages from the engine to connected clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// A roll is in flight; the outcome follows
    DiceRoll,
    /// A resolved roll.
    ///
    /// `dices` carries the raw request specs for the admin console and is
    /// empty on public displays.
    DiceResult {
        #[serde(rename = "playerId")]
        player_id: PlayerId,
        dices: Vec<DieSpec>,
        results: Vec<DieResult>,
    },
    /// Subscription confirmed
    RoomJoined { room: Room },
    /// Unsubscription confirmed
    RoomLeft { room: Room },
    /// Heartbeat response
    Pong,
    /// Request could not be handled
    Error { code: String, message: String },
    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// Event name used by clients to route the message.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::DiceRoll => "diceRoll",
            Self::DiceResult { .. } => "diceResult",
            Self::RoomJoined { .. } => "roomJoined",
            Self::RoomLeft { .. } => "roomLeft",
            Self::Pong => "pong",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_join_room_parses() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"JoinRoom","room":"portrait5"}"#).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::JoinRoom { room: Room::Portrait(id) } if id == PlayerId::new(5)
        ));
    }

    #[test]
    fn unknown_client_message_is_tolerated() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"PlayerDelete"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Unknown));
    }

    #[test]
    fn dice_result_wire_shape() {
        let msg = ServerMessage::DiceResult {
            player_id: PlayerId::new(2),
            dices: vec![],
            results: vec![DieResult::new(9)],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "DiceResult",
                "playerId": 2,
                "dices": [],
                "results": [{ "roll": 9 }]
            })
        );
        assert_eq!(msg.event_name(), "diceResult");
    }

    #[test]
    fn dice_roll_notice_has_no_payload() {
        let json = serde_json::to_string(&ServerMessage::DiceRoll).unwrap();
        assert_eq!(json, r#"{"type":"DiceRoll"}"#);
    }
}
