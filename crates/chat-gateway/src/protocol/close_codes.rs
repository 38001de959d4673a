//! WebSocket close codes
//!
//! Close codes the gateway uses when it ends a connection itself.

use chat_core::DispatchError;
use serde::{Deserialize, Serialize};

/// Gateway WebSocket close codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum CloseCode {
    /// Unknown error occurred
    UnknownError = 4000,
    /// Message `type` not recognized
    UnknownMessageType = 4001,
    /// Frame could not be decoded as a chat message
    DecodeError = 4002,
}

impl CloseCode {
    /// Create a `CloseCode` from a raw u16 value
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            4000 => Some(Self::UnknownError),
            4001 => Some(Self::UnknownMessageType),
            4002 => Some(Self::DecodeError),
            _ => None,
        }
    }

    /// Get the raw u16 value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Get the description for this close code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnknownError => "Unknown error occurred",
            Self::UnknownMessageType => "Unknown message type",
            Self::DecodeError => "Invalid message format",
        }
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.as_u16(), self.description())
    }
}

impl From<&DispatchError> for CloseCode {
    fn from(err: &DispatchError) -> Self {
        match err {
            DispatchError::Protocol(_) => Self::DecodeError,
            DispatchError::UnknownMessageType(_) => Self::UnknownMessageType,
        }
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.as_u16()
    }
}
