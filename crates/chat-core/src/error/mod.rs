//! Error types for the room engine

mod engine_error;

pub use engine_error::{DeliveryError, DispatchError, JokeError, RenameError};
