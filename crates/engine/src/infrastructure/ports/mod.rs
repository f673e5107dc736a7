//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Randomness (random.org -> local RNG fallback)
//! - Room broadcast (WebSocket connection manager)
//! - Platform configuration (SQLite config table)

mod error;
mod external;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::RollConfigRepo;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{BroadcastPort, LocalRandomPort, RemoteRandomPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockBroadcastPort, MockLocalRandomPort, MockRemoteRandomPort};

#[cfg(test)]
pub use repos::MockRollConfigRepo;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{BroadcastError, RandomSourceError, RepoError};
