//! Chat session
//!
//! Represents one connected participant and the callback used to reach it.

use crate::error::DeliveryError;
use crate::jokes::JokeSource;
use crate::protocol::{OutboundMessage, ANONYMOUS};
use crate::room::{Room, RoomRegistry};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Delivers outbound text to one connection
///
/// Supplied by the transport. It must not block and must not call back into
/// the room synchronously: rooms invoke it while holding their member lock.
pub type SendCallback = Arc<dyn Fn(&str) -> Result<(), DeliveryError> + Send + Sync>;

/// A single participant in a room
pub struct Session {
    /// Unique session ID, the identity used for membership
    id: Uuid,

    /// Display name (None until Join)
    name: RwLock<Option<String>>,

    /// The room this session was created for
    room: Arc<Room>,

    /// Transport callback
    send: SendCallback,

    /// Source for `get-joke`
    pub(super) jokes: Arc<dyn JokeSource>,

    /// Set once the transport reports closure
    closed: AtomicBool,
}

impl Session {
    /// Create a session for `room`
    pub fn new(room: Arc<Room>, send: SendCallback, jokes: Arc<dyn JokeSource>) -> Arc<Self> {
        let session = Arc::new(Self {
            id: Uuid::new_v4(),
            name: RwLock::new(None),
            room,
            send,
            jokes,
            closed: AtomicBool::new(false),
        });

        tracing::debug!(
            session_id = %session.id,
            room = %session.room.name(),
            "Created chat session"
        );

        session
    }

    /// Create a session for the room called `room_name`
    pub fn connect(
        registry: &RoomRegistry,
        room_name: &str,
        send: SendCallback,
        jokes: Arc<dyn JokeSource>,
    ) -> Arc<Self> {
        Self::new(registry.get(room_name), send, jokes)
    }

    /// Get the session ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the display name, if one has been set
    pub fn name(&self) -> Option<String> {
        self.name.read().clone()
    }

    /// Get the display name or the anonymous placeholder
    pub fn display_name(&self) -> String {
        self.name().unwrap_or_else(|| ANONYMOUS.to_string())
    }

    pub(crate) fn set_name(&self, name: Option<String>) {
        *self.name.write() = name;
    }

    /// Get the room
    pub fn room(&self) -> &Arc<Room> {
        &self.room
    }

    /// Check if the transport has closed this session
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Deliver text to this session's connection
    ///
    /// Delivery failures are logged and dropped; returns whether the callback
    /// accepted the text.
    pub fn send(&self, text: &str) -> bool {
        match (self.send)(text) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    session_id = %self.id,
                    error = %e,
                    "Delivery failed, message dropped"
                );
                false
            }
        }
    }

    /// Connection was closed: leave the room and tell the others
    ///
    /// Only the first call has any effect.
    pub fn handle_close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!(session_id = %self.id, "Duplicate close ignored");
            return;
        }

        if self.room.leave(self) {
            self.room
                .broadcast(&OutboundMessage::left(&self.display_name(), self.room.name()));
        }

        tracing::debug!(
            session_id = %self.id,
            room = %self.room.name(),
            "Chat session closed"
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("name", &*self.name.read())
            .field("room", &self.room.name())
            .field("closed", &self.is_closed())
            .finish()
    }
}
