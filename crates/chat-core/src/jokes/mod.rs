//! Joke capability
//!
//! `get-joke` is served by whatever source the transport layer injects.

use crate::error::JokeError;
use async_trait::async_trait;

/// Something that can produce a joke on demand
#[async_trait]
pub trait JokeSource: Send + Sync {
    /// Fetch the text of one joke
    async fn fetch_joke(&self) -> Result<String, JokeError>;
}
