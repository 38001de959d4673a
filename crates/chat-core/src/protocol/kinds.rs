//! Inbound message kinds
//!
//! The values accepted in the `type` field of a client message.

use std::fmt;

/// Kind of an inbound client message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Take a display name and enter the room
    Join,
    /// Public message to the whole room
    Chat,
    /// Message to members with a given name
    PrivateChat,
    /// Change display name
    NameChange,
    /// Ask for the member list
    GetMembers,
    /// Ask for a joke
    GetJoke,
}

impl MessageKind {
    /// All recognized kinds
    pub const ALL: [Self; 6] = [
        Self::Join,
        Self::Chat,
        Self::PrivateChat,
        Self::NameChange,
        Self::GetMembers,
        Self::GetJoke,
    ];

    /// Get the wire name of this kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Chat => "chat",
            Self::PrivateChat => "private-chat",
            Self::NameChange => "name-change",
            Self::GetMembers => "get-members",
            Self::GetJoke => "get-joke",
        }
    }

    /// Look up a kind by its wire name
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
