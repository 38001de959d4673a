//! Gateway server setup
//!
//! Provides the WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::chat_handler;
pub use state::GatewayState;

use crate::jokes::DadJokeClient;
use axum::{routing::get, Router};
use chat_common::{AppConfig, AppError};
use chat_core::RoomRegistry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/chat/:room_name", get(chat_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let jokes = DadJokeClient::new(&config.jokes)?;
    tracing::info!(url = %jokes.url(), "Joke source configured");

    Ok(GatewayState::new(
        RoomRegistry::new_shared(),
        Arc::new(jokes),
        config,
    ))
}

/// Serve the application on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener.local_addr().map_err(AppError::server)?;
    tracing::info!("Gateway listening on ws://{}/chat/:room_name", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::server(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.gateway.address();

    let state = create_gateway_state(config)?;
    let app = create_app(state);

    tracing::info!("Starting Gateway server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::server(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
