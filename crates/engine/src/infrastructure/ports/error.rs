//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Why the remote random source could not produce values.
///
/// Every variant is recoverable: the resilient source answers from the local
/// generator instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomSourceError {
    #[error("Random service API key is not configured")]
    MissingCredential,
    #[error("Random service request failed: {0}")]
    Request(String),
    #[error("Random service error {code}: {message}")]
    Service { code: i64, message: String },
    #[error("Invalid random service response: {0}")]
    InvalidResponse(String),
}

/// Errors from publishing to a room.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BroadcastError {
    #[error("Failed to deliver to {failed} subscriber(s) of {room}")]
    Delivery { room: String, failed: usize },
}
