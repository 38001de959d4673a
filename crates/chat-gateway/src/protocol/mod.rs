//! Gateway protocol definitions
//!
//! The chat messages themselves live in `chat_core::protocol`; this module
//! only adds what is specific to WebSocket transport.

mod close_codes;

pub use close_codes::CloseCode;
