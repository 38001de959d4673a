//! Engine error types
//!
//! Only [`DispatchError`] ever reaches the transport collaborator. Delivery
//! failures are absorbed at the point of send, rename rejections and joke
//! failures are reported back to the requesting session as notes.

use thiserror::Error;

/// Failure of a single send callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The underlying connection is gone
    #[error("Connection closed")]
    Closed,

    /// The connection's outbound queue is full
    #[error("Outbound queue full")]
    Backpressure,
}

/// Errors raised while decoding and routing an inbound message
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed inbound structure
    #[error("Malformed message: {0}")]
    Protocol(String),

    /// The `type` field names no known message
    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),
}

impl DispatchError {
    /// Create a protocol error
    #[must_use]
    pub fn protocol(msg: impl std::fmt::Display) -> Self {
        Self::Protocol(msg.to_string())
    }

    /// Check if this is a malformed-structure error
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}

/// Rejections of a rename request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name already taken: {0}")]
    NameTaken(String),

    #[error("Not a member of this room")]
    NotMember,
}

/// Failure of the joke capability
#[derive(Debug, Error)]
pub enum JokeError {
    #[error("Joke source unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected joke payload: {0}")]
    InvalidPayload(String),
}
