//! Outbound message format
//!
//! Everything the relay sends is either a system note or a chat line.

use serde::{Deserialize, Serialize};

/// Placeholder shown for sessions that have not picked a name
pub const ANONYMOUS: &str = "(anonymous)";

/// A message sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// System notice
    Note { text: String },
    /// Chat line, public or private
    Chat { name: Option<String>, text: String },
}

impl OutboundMessage {
    /// Create a system note
    #[must_use]
    pub fn note(text: impl Into<String>) -> Self {
        Self::Note { text: text.into() }
    }

    /// Create a chat line from `name`
    #[must_use]
    pub fn chat(name: Option<String>, text: impl Into<String>) -> Self {
        Self::Chat {
            name,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn joined(name: &str, room: &str) -> Self {
        Self::note(format!("{name} joined \"{room}\"."))
    }

    #[must_use]
    pub fn left(name: &str, room: &str) -> Self {
        Self::note(format!("{name} left {room}."))
    }

    #[must_use]
    pub fn renamed(old: &str, new: &str) -> Self {
        Self::note(format!("{old} is now known as {new}."))
    }

    /// Member list note; `names` are expected sorted
    #[must_use]
    pub fn member_list(room: &str, names: &[String]) -> Self {
        Self::note(format!("Members of \"{room}\": {}.", names.join(", ")))
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Text body of either shape
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Note { text } | Self::Chat { text, .. } => text,
        }
    }
}
