//! Inbound message dispatch
//!
//! Decodes a client frame and routes it to the matching room operation.

use super::Session;
use crate::error::DispatchError;
use crate::protocol::{parse_name_change, parse_private_chat, InboundMessage, OutboundMessage};
use std::sync::Arc;

/// Sent when the joke source fails
const NO_JOKE: &str = "No jokes right now, try again later.";

impl Session {
    /// Handle one raw message from the client
    ///
    /// Returns an error for malformed frames and unknown message types. The
    /// transport decides what to do with the connection; room state is never
    /// touched by a frame that fails to decode.
    pub async fn handle_message(self: &Arc<Self>, raw: &str) -> Result<(), DispatchError> {
        if self.is_closed() {
            tracing::debug!(session_id = %self.id(), "Message after close ignored");
            return Ok(());
        }

        let message = InboundMessage::parse(raw)?;

        tracing::trace!(
            session_id = %self.id(),
            kind = %message.kind(),
            "Received message"
        );

        match message {
            InboundMessage::Join { name } => self.handle_join(name),
            InboundMessage::Chat { text } => self.handle_chat(text),
            InboundMessage::PrivateChat { text } => self.handle_private_chat(&text)?,
            InboundMessage::NameChange { text } => self.handle_name_change(&text),
            InboundMessage::GetMembers => self.room().list_members(self),
            InboundMessage::GetJoke => self.handle_joke().await,
        }

        Ok(())
    }

    /// Take a name, enter the room, announce it
    ///
    /// A member sending `join` again is renamed instead; nothing is announced
    /// as a new arrival.
    fn handle_join(self: &Arc<Self>, name: String) {
        if self.room().is_member(self) {
            self.rename(&name);
            return;
        }

        self.set_name(Some(name.clone()));

        if self.room().join(self) {
            self.room()
                .broadcast(&OutboundMessage::joined(&name, self.room().name()));
        }
    }

    fn handle_chat(&self, text: String) {
        self.room()
            .broadcast(&OutboundMessage::chat(self.name(), text));
    }

    fn handle_private_chat(&self, text: &str) -> Result<(), DispatchError> {
        let private = parse_private_chat(text)?;
        let message = OutboundMessage::chat(self.name(), private.message);

        self.room().private_msg(&message, private.target);

        Ok(())
    }

    fn handle_name_change(&self, text: &str) {
        self.rename(parse_name_change(text));
    }

    /// Rename; a rejection is reported back to this session only
    fn rename(&self, new_name: &str) {
        if let Err(e) = self.room().update_user(new_name, self) {
            tracing::debug!(
                session_id = %self.id(),
                new_name = %new_name,
                error = %e,
                "Rename rejected"
            );
            self.room()
                .private(&OutboundMessage::note(format!("Cannot rename: {e}.")), self);
        }
    }

    async fn handle_joke(&self) {
        let message = match self.jokes.fetch_joke().await {
            Ok(joke) => OutboundMessage::chat(self.name(), joke),
            Err(e) => {
                tracing::warn!(
                    session_id = %self.id(),
                    error = %e,
                    "Joke fetch failed"
                );
                OutboundMessage::note(NO_JOKE)
            }
        };

        self.room().private(&message, self);
    }
}
