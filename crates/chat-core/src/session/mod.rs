//! Sessions
//!
//! A session is one connected participant. Its dispatcher turns client
//! frames into room operations.

mod dispatch;
mod session;

pub use session::{SendCallback, Session};
