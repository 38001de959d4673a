//! Connection plumbing
//!
//! Bridges a chat session's synchronous send capability onto the
//! per-connection writer task.

mod outbox;

pub use outbox::{outbox, Outbound};
