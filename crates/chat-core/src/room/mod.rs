//! Rooms
//!
//! Room membership, fan-out, and the process-wide room registry.

mod registry;
mod room;

pub use registry::RoomRegistry;
pub use room::Room;
