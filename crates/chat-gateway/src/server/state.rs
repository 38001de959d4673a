//! Gateway state
//!
//! Application state for the gateway server.

use chat_common::AppConfig;
use chat_core::{JokeSource, RoomRegistry};
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Every room known to this process
    registry: Arc<RoomRegistry>,
    /// Joke capability handed to each session
    jokes: Arc<dyn JokeSource>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(registry: Arc<RoomRegistry>, jokes: Arc<dyn JokeSource>, config: AppConfig) -> Self {
        Self {
            registry,
            jokes,
            config: Arc::new(config),
        }
    }

    /// Get the room registry
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Get a handle to the joke source
    pub fn jokes(&self) -> Arc<dyn JokeSource> {
        Arc::clone(&self.jokes)
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish()
    }
}
