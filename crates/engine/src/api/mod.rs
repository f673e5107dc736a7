//! API layer - HTTP and WebSocket entry points.

use std::sync::Arc;

use axum::{routing::get, Router};

pub mod connections;
pub mod http;
pub mod identity;
pub mod websocket;

pub use connections::{ConnectionManager, SharedConnectionManager};

use crate::app::App;
use websocket::WsState;

/// Build the full router with separate states for HTTP and WebSocket.
pub fn router(app: Arc<App>, connections: SharedConnectionManager) -> Router {
    let ws_state = Arc::new(WsState { connections });

    http::routes()
        .with_state(app)
        .route("/ws", get(websocket::ws_handler).with_state(ws_state))
}
