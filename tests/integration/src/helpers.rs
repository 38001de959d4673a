//! Test helpers for integration tests
//!
//! Provides utilities for spawning a gateway on an ephemeral port and
//! driving it with real WebSocket clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chat_common::AppConfig;
use chat_core::{JokeSource, OutboundMessage, RoomRegistry};
use chat_gateway::{create_app, GatewayState};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

/// How long to wait for a frame that should arrive
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before concluding that nothing will arrive
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Test gateway instance that manages lifecycle
pub struct TestGateway {
    pub addr: SocketAddr,
    pub registry: Arc<RoomRegistry>,
    _handle: JoinHandle<()>,
}

impl TestGateway {
    /// Start a gateway with default config
    pub async fn start(jokes: Arc<dyn JokeSource>) -> Result<Self> {
        Self::start_with_config(AppConfig::default(), jokes).await
    }

    /// Start a gateway with custom config
    pub async fn start_with_config(config: AppConfig, jokes: Arc<dyn JokeSource>) -> Result<Self> {
        let registry = RoomRegistry::new_shared();
        let app = create_app(GatewayState::new(registry.clone(), jokes, config));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            registry,
            _handle: handle,
        })
    }

    /// Get base URL for plain HTTP requests
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Open a WebSocket to a room
    pub async fn connect(&self, room: &str) -> Result<ChatClient> {
        let url = format!("ws://{}/chat/{room}", self.addr);
        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("connecting to room {room}"))?;
        Ok(ChatClient { ws })
    }

    /// Connect and join a room, consuming the client's own join notice
    pub async fn join(&self, room: &str, name: &str) -> Result<ChatClient> {
        let mut client = self.connect(room).await?;
        client.send(&crate::join(name)).await?;
        client
            .expect_note(&format!("{name} joined \"{room}\"."))
            .await?;
        Ok(client)
    }
}

/// A WebSocket chat client
pub struct ChatClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl ChatClient {
    /// Send a JSON frame
    pub async fn send(&mut self, frame: &Value) -> Result<()> {
        self.send_raw(&frame.to_string()).await
    }

    /// Send a text frame as-is
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.ws.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a binary frame
    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.ws.send(Message::Binary(bytes)).await?;
        Ok(())
    }

    /// Receive the next chat message
    pub async fn recv(&mut self) -> Result<OutboundMessage> {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .context("timed out waiting for a message")?
                .context("connection ended")??;

            match frame {
                Message::Text(text) => return Ok(OutboundMessage::from_json(&text)?),
                Message::Close(frame) => bail!("connection closed: {frame:?}"),
                _ => {}
            }
        }
    }

    /// Receive the next message and require it to be this note
    pub async fn expect_note(&mut self, text: &str) -> Result<()> {
        let message = self.recv().await?;
        if message != OutboundMessage::note(text) {
            bail!("expected note {text:?}, got {message:?}");
        }
        Ok(())
    }

    /// Require that nothing arrives for a short while
    pub async fn expect_silence(&mut self) -> Result<()> {
        match tokio::time::timeout(SILENCE_WINDOW, self.ws.next()).await {
            Err(_) => Ok(()),
            Ok(frame) => bail!("expected silence, got {frame:?}"),
        }
    }

    /// Wait for the server to close, skipping queued text, and return the code
    pub async fn recv_close_code(&mut self) -> Result<Option<u16>> {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .context("timed out waiting for close")?;

            match frame {
                Some(Ok(Message::Close(frame))) => return Ok(frame.map(|f| u16::from(f.code))),
                Some(Ok(_)) => {}
                Some(Err(e)) => bail!("WebSocket error before close: {e}"),
                None => return Ok(None),
            }
        }
    }

    /// Close the connection from the client side
    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        // Drain until the server acknowledges
        while let Ok(Some(Ok(_))) = tokio::time::timeout(RECV_TIMEOUT, self.ws.next()).await {}
        Ok(())
    }
}
