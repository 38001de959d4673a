//! Per-connection outbound queue

use crate::protocol::CloseCode;
use chat_core::{DeliveryError, SendCallback};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Frame queued for the connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Serialized chat message
    Text(String),
    /// Close the socket with this code after everything queued before it
    Close(CloseCode),
}

/// Wrap the writer queue as a session send callback
///
/// Never blocks: a full queue is reported as backpressure and the message
/// is dropped for this recipient only.
pub fn outbox(sender: mpsc::Sender<Outbound>) -> SendCallback {
    Arc::new(move |text: &str| {
        sender
            .try_send(Outbound::Text(text.to_string()))
            .map_err(|e| match e {
                TrySendError::Full(_) => DeliveryError::Backpressure,
                TrySendError::Closed(_) => DeliveryError::Closed,
            })
    })
}
