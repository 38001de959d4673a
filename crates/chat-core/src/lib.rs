//! # chat-core
//!
//! Room membership and message fan-out engine.
//! This crate has zero dependencies on any transport: a connection is
//! represented only by the send callback it hands to its [`Session`].

pub mod error;
pub mod jokes;
pub mod protocol;
pub mod room;
pub mod session;

// Re-export commonly used types at crate root
pub use error::{DeliveryError, DispatchError, JokeError, RenameError};
pub use jokes::JokeSource;
pub use protocol::{InboundMessage, MessageKind, OutboundMessage};
pub use room::{Room, RoomRegistry};
pub use session::{SendCallback, Session};
