//! icanhazdadjoke.com client
//!
//! Fetches a single random joke per request. The service answers with
//! `{"id": ..., "joke": ..., "status": 200}` when asked for JSON.

use async_trait::async_trait;
use chat_common::{AppError, JokeConfig};
use chat_core::{JokeError, JokeSource};
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

/// User agent sent with every request; the service asks clients to set one.
const USER_AGENT: &str = concat!("chat-relay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct JokeResponse {
    joke: String,
}

/// HTTP joke source
#[derive(Debug, Clone)]
pub struct DadJokeClient {
    client: Client,
    url: String,
}

impl DadJokeClient {
    /// Build a client from configuration
    pub fn new(config: &JokeConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::external(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Endpoint this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JokeSource for DadJokeClient {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| JokeError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JokeError::Unavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body: JokeResponse = response
            .json()
            .await
            .map_err(|e| JokeError::InvalidPayload(e.to_string()))?;

        tracing::debug!(url = %self.url, "Fetched joke");
        Ok(body.joke)
    }
}
