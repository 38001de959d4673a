//! # chat-gateway
//!
//! WebSocket gateway: one chat session per connection, rooms selected by
//! URL path.

pub mod connection;
pub mod jokes;
pub mod protocol;
pub mod server;

pub use server::{create_app, create_gateway_state, create_router, run, run_server, GatewayState};
