//! External service port traits (randomness, room broadcast).

use async_trait::async_trait;
use sheetroll_domain::DrawRange;
use sheetroll_shared::{Room, ServerMessage};

use super::error::{BroadcastError, RandomSourceError};

// =============================================================================
// Randomness
// =============================================================================

/// A remote true-random service. May fail; callers decide what to do about it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteRandomPort: Send + Sync {
    /// `count` integers, each in `range`.
    async fn generate(&self, range: DrawRange, count: u32)
        -> Result<Vec<i64>, RandomSourceError>;
}

/// A local pseudo-random generator. Never fails.
#[cfg_attr(test, mockall::automock)]
pub trait LocalRandomPort: Send + Sync {
    /// `count` integers, each in `range`.
    fn generate(&self, range: DrawRange, count: u32) -> Vec<i64>;
}

// =============================================================================
// Room Broadcast
// =============================================================================

/// Room-addressed publish. Delivery is best-effort and unacknowledged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BroadcastPort: Send + Sync {
    async fn publish(&self, room: Room, message: ServerMessage) -> Result<(), BroadcastError>;
}
