//! Client frames and canned joke sources

use async_trait::async_trait;
use chat_core::{JokeError, JokeSource};
use serde_json::{json, Value};

/// Joke source that always answers with the same line
pub struct StaticJokes(pub &'static str);

#[async_trait]
impl JokeSource for StaticJokes {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        Ok(self.0.to_string())
    }
}

/// Joke source that is always down
pub struct NoJokes;

#[async_trait]
impl JokeSource for NoJokes {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        Err(JokeError::Unavailable("offline".to_string()))
    }
}

pub fn join(name: &str) -> Value {
    json!({ "type": "join", "name": name })
}

pub fn chat(text: &str) -> Value {
    json!({ "type": "chat", "text": text })
}

pub fn private_chat(target: &str, text: &str) -> Value {
    json!({ "type": "private-chat", "text": format!("/priv {target} {text}") })
}

pub fn name_change(new_name: &str) -> Value {
    json!({ "type": "name-change", "text": format!("/name {new_name}") })
}

pub fn get_members() -> Value {
    json!({ "type": "get-members" })
}

pub fn get_joke() -> Value {
    json!({ "type": "get-joke" })
}
