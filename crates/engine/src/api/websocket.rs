//! WebSocket handling for room subscribers.
//!
//! Player sheets, the admin console and portrait overlays connect here and
//! join the rooms they want to watch. Roll events reach them through the
//! [`ConnectionManager`].

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use sheetroll_domain::Requester;
use sheetroll_shared::{ClientMessage, ServerMessage};

use super::connections::{ConnectionError, ConnectionManager};
use super::identity::Identity;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for new connections.
///
/// Identity headers on the upgrade request are optional; without them the
/// connection may only watch portrait rooms.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<WsState>>,
) -> Response {
    let requester = Identity::from_headers(&headers);
    ws.on_upgrade(move |socket| handle_socket(socket, state, requester))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>, requester: Option<Requester>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = Uuid::new_v4();

    // Create a bounded channel for sending messages to this client
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    state
        .connections
        .register(connection_id, requester, tx.clone())
        .await;

    tracing::info!(
        connection_id = %connection_id,
        player_id = ?requester.map(|r| r.id().as_i64()),
        "WebSocket connection established"
    );

    // Spawn a task to forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let response = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(msg) => handle_message(msg, &state, connection_id).await,
                    Err(e) => {
                        tracing::warn!(connection_id = %connection_id, error = %e, "Failed to parse message");
                        Some(ServerMessage::error(
                            "PARSE_ERROR",
                            format!("Invalid message format: {}", e),
                        ))
                    }
                };

                if let Some(response) = response {
                    if tx.try_send(response).is_err() {
                        tracing::warn!(
                            connection_id = %connection_id,
                            "Failed to send response, channel full or closed"
                        );
                    }
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    state.connections.unregister(connection_id).await;
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client message.
async fn handle_message(
    msg: ClientMessage,
    state: &WsState,
    connection_id: Uuid,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Heartbeat => Some(ServerMessage::Pong),

        ClientMessage::JoinRoom { room } => {
            match state.connections.join_room(connection_id, room).await {
                Ok(()) => Some(ServerMessage::RoomJoined { room }),
                Err(ConnectionError::Unauthorized) => Some(ServerMessage::error(
                    "UNAUTHORIZED",
                    format!("Not allowed to join {}", room),
                )),
                Err(ConnectionError::NotFound) => Some(ServerMessage::error(
                    "NOT_CONNECTED",
                    "Connection is not registered",
                )),
            }
        }

        ClientMessage::LeaveRoom { room } => {
            match state.connections.leave_room(connection_id, room).await {
                Ok(()) => Some(ServerMessage::RoomLeft { room }),
                Err(e) => Some(ServerMessage::error("NOT_CONNECTED", e.to_string())),
            }
        }

        ClientMessage::Unknown => {
            tracing::debug!(connection_id = %connection_id, "Ignoring unknown message type");
            Some(ServerMessage::error("UNKNOWN_MESSAGE", "Unknown message type"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetroll_domain::PlayerId;
    use sheetroll_shared::Room;

    async fn state_with(requester: Option<Requester>) -> (WsState, Uuid, mpsc::Receiver<ServerMessage>) {
        let connections = Arc::new(ConnectionManager::new());
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(8);
        connections.register(id, requester, tx).await;
        (WsState { connections }, id, rx)
    }

    #[tokio::test]
    async fn heartbeat_answers_pong() {
        let (state, id, _rx) = state_with(None).await;
        let response = handle_message(ClientMessage::Heartbeat, &state, id).await;
        assert_eq!(response, Some(ServerMessage::Pong));
    }

    #[tokio::test]
    async fn join_portrait_confirms() {
        let (state, id, _rx) = state_with(None).await;
        let room = Room::Portrait(PlayerId::new(6));

        let response = handle_message(ClientMessage::JoinRoom { room }, &state, id).await;

        assert_eq!(response, Some(ServerMessage::RoomJoined { room }));
        assert_eq!(state.connections.room_size(room), 1);
    }

    #[tokio::test]
    async fn non_admin_cannot_join_admin() {
        let (state, id, _rx) = state_with(Some(Requester::player(PlayerId::new(2)))).await;

        let response = handle_message(ClientMessage::JoinRoom { room: Room::Admin }, &state, id).await;

        assert!(matches!(
            response,
            Some(ServerMessage::Error { ref code, .. }) if code == "UNAUTHORIZED"
        ));
        assert_eq!(state.connections.room_size(Room::Admin), 0);
    }

    #[tokio::test]
    async fn admin_joins_and_leaves() {
        let (state, id, _rx) = state_with(Some(Requester::admin(PlayerId::new(1)))).await;

        let joined = handle_message(ClientMessage::JoinRoom { room: Room::Admin }, &state, id).await;
        assert_eq!(joined, Some(ServerMessage::RoomJoined { room: Room::Admin }));

        let left = handle_message(ClientMessage::LeaveRoom { room: Room::Admin }, &state, id).await;
        assert_eq!(left, Some(ServerMessage::RoomLeft { room: Room::Admin }));
        assert_eq!(state.connections.room_size(Room::Admin), 0);
    }

    #[tokio::test]
    async fn unknown_message_is_an_error() {
        let (state, id, _rx) = state_with(None).await;
        let response = handle_message(ClientMessage::Unknown, &state, id).await;
        assert!(matches!(response, Some(ServerMessage::Error { .. })));
    }

    #[tokio::test]
    async fn protocol_ping_is_not_answered_with_json() {
        use axum::{routing::get, Router};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let state = Arc::new(WsState {
            connections: Arc::new(ConnectionManager::new()),
        });
        let router = Router::new().route("/ws", get(ws_handler)).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let handshake = format!(
            "GET /ws HTTP/1.1\r\nHost: {}\r\nUpgrade: websocket\r\nConnection: Upgrade\r\n\
             Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\nSec-WebSocket-Version: 13\r\n\r\n",
            addr
        );
        stream.write_all(handshake.as_bytes()).await.unwrap();

        let mut head = Vec::new();
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") {
            stream.read_exact(&mut byte).await.unwrap();
            head.push(byte[0]);
        }
        assert!(head.starts_with(b"HTTP/1.1 101"));

        // Client frames are masked; an all-zero mask leaves the payload as is.
        stream.write_all(&[0x89, 0x80, 0, 0, 0, 0]).await.unwrap();
        let heartbeat = br#"{"type":"Heartbeat"}"#;
        let mut frame = vec![0x81, 0x80 | heartbeat.len() as u8, 0, 0, 0, 0];
        frame.extend_from_slice(heartbeat);
        stream.write_all(&frame).await.unwrap();

        // Protocol pong first, then the JSON answer to the heartbeat and nothing between.
        let mut header = [0u8; 2];
        stream.read_exact(&mut header).await.unwrap();
        assert_eq!(header, [0x8A, 0x00]);

        stream.read_exact(&mut header).await.unwrap();
        assert_eq!(header[0], 0x81);
        let mut payload = vec![0u8; usize::from(header[1])];
        stream.read_exact(&mut payload).await.unwrap();
        let message: ServerMessage = serde_json::from_slice(&payload).unwrap();
        assert_eq!(message, ServerMessage::Pong);
    }
}
