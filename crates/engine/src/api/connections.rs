//! Connection management for WebSocket clients.
//!
//! Tracks connected clients and the rooms they subscribe to.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use sheetroll_domain::Requester;
use sheetroll_shared::{Room, ServerMessage};

use crate::infrastructure::ports::{BroadcastError, BroadcastPort};

/// Information about a connected client.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Unique ID for this connection
    pub connection_id: Uuid,
    /// Identity presented on the upgrade request, if any
    pub requester: Option<Requester>,
    /// Rooms this connection receives
    pub rooms: HashSet<Room>,
}

impl ConnectionInfo {
    /// Check if this connection may watch the admin console.
    pub fn is_admin(&self) -> bool {
        self.requester.is_some_and(|r| r.is_admin())
    }
}

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    /// Map of connection_id -> (ConnectionInfo, sender channel)
    connections: RwLock<HashMap<Uuid, (ConnectionInfo, mpsc::Sender<ServerMessage>)>>,
    /// Room -> subscribed connection ids
    rooms: DashMap<Room, HashSet<Uuid>>,
}

pub type SharedConnectionManager = Arc<ConnectionManager>;

impl ConnectionManager {
    /// Create a new connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            rooms: DashMap::new(),
        }
    }

    /// Register a new connection.
    pub async fn register(
        &self,
        connection_id: Uuid,
        requester: Option<Requester>,
        sender: mpsc::Sender<ServerMessage>,
    ) {
        let info = ConnectionInfo {
            connection_id,
            requester,
            rooms: HashSet::new(),
        };
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, (info, sender));
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection, dropping all of its subscriptions.
    pub async fn unregister(&self, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if let Some((info, _)) = connections.remove(&connection_id) {
            for room in &info.rooms {
                self.remove_member(*room, connection_id);
            }
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
    }

    /// Subscribe a connection to a room.
    ///
    /// Portrait rooms are open; the admin room needs an admin identity.
    pub async fn join_room(&self, connection_id: Uuid, room: Room) -> Result<(), ConnectionError> {
        let mut connections = self.connections.write().await;
        let Some((info, _)) = connections.get_mut(&connection_id) else {
            return Err(ConnectionError::NotFound);
        };

        if room.is_admin() && !info.is_admin() {
            return Err(ConnectionError::Unauthorized);
        }

        info.rooms.insert(room);
        self.rooms.entry(room).or_default().insert(connection_id);
        tracing::info!(connection_id = %connection_id, room = %room, "Connection joined room");
        Ok(())
    }

    /// Unsubscribe a connection from a room.
    pub async fn leave_room(&self, connection_id: Uuid, room: Room) -> Result<(), ConnectionError> {
        let mut connections = self.connections.write().await;
        let Some((info, _)) = connections.get_mut(&connection_id) else {
            return Err(ConnectionError::NotFound);
        };

        if info.rooms.remove(&room) {
            self.remove_member(room, connection_id);
            tracing::info!(connection_id = %connection_id, room = %room, "Connection left room");
        }
        Ok(())
    }

    /// Number of connections subscribed to a room.
    pub fn room_size(&self, room: Room) -> usize {
        self.rooms.get(&room).map(|members| members.len()).unwrap_or(0)
    }

    /// Broadcast a message to every connection in a room.
    ///
    /// Returns how many subscribers could not be reached.
    pub async fn broadcast_to_room(&self, room: Room, message: ServerMessage) -> usize {
        let members: Vec<Uuid> = match self.rooms.get(&room) {
            Some(members) => members.iter().copied().collect(),
            None => return 0,
        };

        let connections = self.connections.read().await;
        let mut failed = 0;
        for connection_id in members {
            let Some((_, sender)) = connections.get(&connection_id) else {
                continue;
            };
            if let Err(e) = sender.try_send(message.clone()) {
                failed += 1;
                tracing::warn!(
                    connection_id = %connection_id,
                    room = %room,
                    error = %e,
                    "Failed to broadcast message"
                );
            }
        }
        failed
    }

    fn remove_member(&self, room: Room, connection_id: Uuid) {
        if let Some(mut members) = self.rooms.get_mut(&room) {
            members.remove(&connection_id);
        }
        self.rooms.remove_if(&room, |_, members| members.is_empty());
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BroadcastPort for ConnectionManager {
    async fn publish(&self, room: Room, message: ServerMessage) -> Result<(), BroadcastError> {
        match self.broadcast_to_room(room, message).await {
            0 => Ok(()),
            failed => Err(BroadcastError::Delivery {
                room: room.to_string(),
                failed,
            }),
        }
    }
}

/// Errors that can occur during connection operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection not found")]
    NotFound,
    #[error("Not authorized for this action")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetroll_domain::PlayerId;

    async fn connect(
        manager: &ConnectionManager,
        requester: Option<Requester>,
    ) -> (Uuid, mpsc::Receiver<ServerMessage>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(4);
        manager.register(id, requester, tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn room_members_receive_broadcasts() {
        let manager = ConnectionManager::new();
        let room = Room::Portrait(PlayerId::new(5));
        let (watcher, mut watcher_rx) = connect(&manager, None).await;
        let (_other, mut other_rx) = connect(&manager, None).await;

        manager.join_room(watcher, room).await.unwrap();
        manager.publish(room, ServerMessage::DiceRoll).await.unwrap();

        assert_eq!(watcher_rx.try_recv().unwrap(), ServerMessage::DiceRoll);
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn admin_room_requires_admin() {
        let manager = ConnectionManager::new();
        let (player, _rx) = connect(&manager, Some(Requester::player(PlayerId::new(2)))).await;
        let (anon, _rx2) = connect(&manager, None).await;
        let (admin, _rx3) = connect(&manager, Some(Requester::admin(PlayerId::new(1)))).await;

        assert!(matches!(
            manager.join_room(player, Room::Admin).await,
            Err(ConnectionError::Unauthorized)
        ));
        assert!(matches!(
            manager.join_room(anon, Room::Admin).await,
            Err(ConnectionError::Unauthorized)
        ));
        manager.join_room(admin, Room::Admin).await.unwrap();
        assert_eq!(manager.room_size(Room::Admin), 1);
    }

    #[tokio::test]
    async fn unknown_connection_cannot_join() {
        let manager = ConnectionManager::new();
        let result = manager
            .join_room(Uuid::new_v4(), Room::Portrait(PlayerId::new(1)))
            .await;
        assert!(matches!(result, Err(ConnectionError::NotFound)));
    }

    #[tokio::test]
    async fn leave_and_unregister_drop_subscriptions() {
        let manager = ConnectionManager::new();
        let room = Room::Portrait(PlayerId::new(9));
        let (first, _rx1) = connect(&manager, None).await;
        let (second, _rx2) = connect(&manager, None).await;
        manager.join_room(first, room).await.unwrap();
        manager.join_room(second, room).await.unwrap();
        assert_eq!(manager.room_size(room), 2);

        manager.leave_room(first, room).await.unwrap();
        assert_eq!(manager.room_size(room), 1);

        manager.unregister(second).await;
        assert_eq!(manager.room_size(room), 0);
        assert!(matches!(
            manager.leave_room(second, room).await,
            Err(ConnectionError::NotFound)
        ));
    }

    #[tokio::test]
    async fn full_channel_is_a_delivery_failure() {
        let manager = ConnectionManager::new();
        let room = Room::Portrait(PlayerId::new(4));
        let id = Uuid::new_v4();
        let (tx, _rx) = mpsc::channel(1);
        manager.register(id, None, tx).await;
        manager.join_room(id, room).await.unwrap();

        manager.publish(room, ServerMessage::DiceRoll).await.unwrap();
        let result = manager.publish(room, ServerMessage::DiceRoll).await;

        assert_eq!(
            result,
            Err(BroadcastError::Delivery {
                room: "portrait4".into(),
                failed: 1
            })
        );
    }

    #[tokio::test]
    async fn empty_room_publish_is_ok() {
        let manager = ConnectionManager::new();
        assert!(manager.publish(Room::Admin, ServerMessage::Pong).await.is_ok());
    }
}
