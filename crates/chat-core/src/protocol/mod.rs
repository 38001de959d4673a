//! Chat protocol definitions
//!
//! Defines the JSON messages exchanged with clients.

mod inbound;
mod kinds;
mod outbound;

pub use inbound::{parse_name_change, parse_private_chat, InboundMessage, PrivateChat};
pub use kinds::MessageKind;
pub use outbound::{OutboundMessage, ANONYMOUS};
