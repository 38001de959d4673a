//! Chat room
//!
//! A room owns the set of sessions currently in it and fans messages out to
//! them. Every operation runs under the room's member lock, so a broadcast
//! always sees one consistent membership and each recipient receives the
//! room's messages in the order they were issued.
//!
//! Send callbacks run while that lock is held. A callback that blocks stalls
//! every operation on the room, so callbacks must hand the text off without
//! waiting (see [`SendCallback`](crate::SendCallback)) and report a full
//! queue as [`DeliveryError::Backpressure`](crate::DeliveryError::Backpressure).

use crate::error::RenameError;
use crate::protocol::OutboundMessage;
use crate::session::Session;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A named chat room
pub struct Room {
    /// Unique room name
    name: String,

    /// Current members keyed by session ID
    members: Mutex<HashMap<Uuid, Arc<Session>>>,
}

impl Room {
    /// Create an empty room
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Mutex::new(HashMap::new()),
        }
    }

    /// Get the room name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a session to the room
    ///
    /// Returns `false` if the session belongs to another room or has already
    /// been closed. Joining twice keeps a single membership.
    pub fn join(&self, session: &Arc<Session>) -> bool {
        if !std::ptr::eq(Arc::as_ptr(session.room()), self) {
            tracing::warn!(
                room = %self.name,
                session_id = %session.id(),
                session_room = %session.room().name(),
                "Refusing join from a session of another room"
            );
            return false;
        }

        let mut members = self.members.lock();

        // Checked under the lock: close flags the session before leaving
        if session.is_closed() {
            return false;
        }

        members.insert(session.id(), Arc::clone(session));

        tracing::debug!(
            room = %self.name,
            session_id = %session.id(),
            members = members.len(),
            "Session joined room"
        );

        true
    }

    /// Remove a session from the room
    ///
    /// Returns `false` if it was not a member.
    pub fn leave(&self, session: &Session) -> bool {
        let mut members = self.members.lock();
        let removed = members.remove(&session.id()).is_some();

        if removed {
            tracing::debug!(
                room = %self.name,
                session_id = %session.id(),
                members = members.len(),
                "Session left room"
            );
        }

        removed
    }

    /// Send a message to every member
    ///
    /// Returns the number of successful deliveries.
    pub fn broadcast(&self, message: &OutboundMessage) -> usize {
        let Some(text) = self.encode(message) else {
            return 0;
        };

        let members = self.members.lock();
        let sent = deliver(members.values(), &text);

        tracing::trace!(
            room = %self.name,
            members = members.len(),
            sent = sent,
            "Message broadcast to room"
        );

        sent
    }

    /// Send a message to every member except one
    pub fn broadcast_except(&self, message: &OutboundMessage, exclude: &Session) -> usize {
        let Some(text) = self.encode(message) else {
            return 0;
        };

        let members = self.members.lock();
        deliver(
            members.values().filter(|member| member.id() != exclude.id()),
            &text,
        )
    }

    /// Send a message to the members currently named `target_name`
    ///
    /// No match is not an error; the message is simply not delivered.
    pub fn private_msg(&self, message: &OutboundMessage, target_name: &str) -> usize {
        let Some(text) = self.encode(message) else {
            return 0;
        };

        let members = self.members.lock();
        let sent = deliver(
            members
                .values()
                .filter(|member| member.name().as_deref() == Some(target_name)),
            &text,
        );

        tracing::trace!(
            room = %self.name,
            target = %target_name,
            sent = sent,
            "Private message routed"
        );

        sent
    }

    /// Send a message to one session, in order with the room's other traffic
    pub fn private(&self, message: &OutboundMessage, session: &Session) -> bool {
        let Some(text) = self.encode(message) else {
            return false;
        };

        let _members = self.members.lock();
        session.send(&text)
    }

    /// Tell `requesting` who is in the room
    pub fn list_members(&self, requesting: &Session) {
        let members = self.members.lock();
        let names = sorted_names(&members);

        if let Some(text) = self.encode(&OutboundMessage::member_list(&self.name, &names)) {
            requesting.send(&text);
        }
    }

    /// Rename a member
    ///
    /// Duplicate names are rejected; renaming to one's current name is a
    /// no-op. On success the other members are told about the new name and
    /// the session gets a confirmation. Returns the previous display name.
    pub fn update_user(&self, new_name: &str, session: &Session) -> Result<String, RenameError> {
        if new_name.trim().is_empty() {
            return Err(RenameError::EmptyName);
        }

        let members = self.members.lock();

        if !members.contains_key(&session.id()) {
            return Err(RenameError::NotMember);
        }

        let taken = members
            .values()
            .any(|member| member.id() != session.id() && member.name().as_deref() == Some(new_name));
        if taken {
            return Err(RenameError::NameTaken(new_name.to_string()));
        }

        let old_name = session.display_name();
        if session.name().as_deref() == Some(new_name) {
            return Ok(old_name);
        }

        session.set_name(Some(new_name.to_string()));

        tracing::debug!(
            room = %self.name,
            session_id = %session.id(),
            old_name = %old_name,
            new_name = %new_name,
            "Member renamed"
        );

        if let Some(text) = self.encode(&OutboundMessage::renamed(&old_name, new_name)) {
            deliver(
                members.values().filter(|member| member.id() != session.id()),
                &text,
            );
        }
        if let Some(text) = self.encode(&OutboundMessage::note(format!(
            "You are now known as {new_name}."
        ))) {
            session.send(&text);
        }

        Ok(old_name)
    }

    /// Get the number of members
    pub fn member_count(&self) -> usize {
        self.members.lock().len()
    }

    /// Get the members' display names, sorted
    pub fn member_names(&self) -> Vec<String> {
        sorted_names(&self.members.lock())
    }

    /// Check if a session is a member
    pub fn is_member(&self, session: &Session) -> bool {
        self.members.lock().contains_key(&session.id())
    }

    fn encode(&self, message: &OutboundMessage) -> Option<String> {
        match message.to_json() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!(room = %self.name, error = %e, "Failed to encode message");
                None
            }
        }
    }
}

/// Attempt delivery to each member, counting successes
fn deliver<'a>(members: impl Iterator<Item = &'a Arc<Session>>, text: &str) -> usize {
    members.filter(|member| member.send(text)).count()
}

fn sorted_names(members: &HashMap<Uuid, Arc<Session>>) -> Vec<String> {
    let mut names: Vec<String> = members.values().map(|member| member.display_name()).collect();
    names.sort();
    names
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("name", &self.name)
            .field("members", &self.members.lock().len())
            .finish()
    }
}
