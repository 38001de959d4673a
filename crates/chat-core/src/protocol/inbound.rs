//! Inbound message format
//!
//! Every client frame is a JSON object with a required `type` field.

use super::MessageKind;
use crate::error::DispatchError;
use serde::Deserialize;
use serde_json::Value;

/// A decoded client message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    Join { name: String },
    Chat { text: String },
    /// `text` is `"<cmd> <targetName> <message...>"`
    PrivateChat { text: String },
    /// `text` is `"<cmd> <newName>"`
    NameChange { text: String },
    GetMembers,
    GetJoke,
}

impl InboundMessage {
    /// Decode a raw text frame
    ///
    /// The `type` field is checked before the rest of the shape so that an
    /// unrecognized kind is reported as such rather than as malformed input.
    pub fn parse(raw: &str) -> Result<Self, DispatchError> {
        let value: Value = serde_json::from_str(raw)?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::protocol("missing string field `type`"))?;

        if MessageKind::from_wire(kind).is_none() {
            return Err(DispatchError::UnknownMessageType(kind.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Get the kind of this message
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Join { .. } => MessageKind::Join,
            Self::Chat { .. } => MessageKind::Chat,
            Self::PrivateChat { .. } => MessageKind::PrivateChat,
            Self::NameChange { .. } => MessageKind::NameChange,
            Self::GetMembers => MessageKind::GetMembers,
            Self::GetJoke => MessageKind::GetJoke,
        }
    }
}

/// Decoded `private-chat` command text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateChat<'a> {
    pub target: &'a str,
    pub message: &'a str,
}

/// Split `"<cmd> <targetName> <message...>"`
///
/// The message keeps its inner spacing and may be empty.
pub fn parse_private_chat(text: &str) -> Result<PrivateChat<'_>, DispatchError> {
    let mut parts = text.splitn(3, ' ');
    let _command = parts.next();

    let target = parts
        .next()
        .filter(|target| !target.is_empty())
        .ok_or_else(|| {
            DispatchError::protocol("private-chat text must be `<cmd> <targetName> <message>`")
        })?;

    Ok(PrivateChat {
        target,
        message: parts.next().unwrap_or(""),
    })
}

/// Extract the new name from `"<cmd> <newName>"`
///
/// Missing names come back empty and are rejected by the room.
#[must_use]
pub fn parse_name_change(text: &str) -> &str {
    text.split(' ').nth(1).unwrap_or("")
}
