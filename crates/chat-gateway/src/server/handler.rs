//! WebSocket handler
//!
//! One chat session per upgraded socket. Inbound frames are dispatched in
//! arrival order; outbound text goes through a bounded queue drained by a
//! writer task.

use crate::connection::{outbox, Outbound};
use crate::protocol::CloseCode;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use chat_core::Session;
use futures_util::{SinkExt, StreamExt};
use std::borrow::Cow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Chat room handler for `GET /chat/:room_name`
pub async fn chat_handler(
    State(state): State<GatewayState>,
    Path(room_name): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, room_name, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, room_name: String, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<Outbound>(state.config().session.outbound_buffer);

    let session = Session::connect(
        state.registry(),
        &room_name,
        outbox(tx.clone()),
        state.jokes(),
    );
    let session_id = session.id();

    tracing::info!(session_id = %session_id, room = %room_name, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let recv_session = session.clone();
    let control = tx;

    // Frames are handled one at a time so a session's messages stay ordered
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            let close_code = match msg {
                Ok(Message::Text(text)) => match recv_session.handle_message(&text).await {
                    Ok(()) => continue,
                    Err(e) => {
                        tracing::debug!(session_id = %session_id, error = %e, "Rejected message");
                        CloseCode::from(&e)
                    }
                },
                Ok(Message::Binary(_)) => {
                    tracing::debug!(session_id = %session_id, "Binary messages not supported");
                    CloseCode::DecodeError
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(session_id = %session_id, "Ping received");
                    continue;
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id, "Pong received");
                    continue;
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id, "Client closed connection");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "WebSocket error");
                    return None;
                }
            };

            // Queued behind anything already addressed to this client
            let _ = control.send(Outbound::Close(close_code)).await;
            return Some(close_code);
        }
        None
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(out) = rx.recv().await {
            match out {
                Outbound::Text(text) => {
                    if ws_sink.send(Message::Text(text)).await.is_err() {
                        tracing::warn!(
                            session_id = %session_id,
                            "Failed to send message to WebSocket"
                        );
                        break;
                    }
                }
                Outbound::Close(code) => {
                    let frame = CloseFrame {
                        code: code.as_u16(),
                        reason: Cow::Borrowed(code.description()),
                    };
                    let _ = ws_sink.send(Message::Close(Some(frame))).await;
                    break;
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Wait for either side to finish
    let send_finished = tokio::select! {
        result = &mut recv_task => {
            match result {
                Ok(Some(close_code)) => tracing::debug!(
                    session_id = %session_id,
                    close_code = %close_code,
                    "Closing connection due to error"
                ),
                Ok(None) => {}
                Err(e) => tracing::error!(session_id = %session_id, error = %e, "Receive task failed"),
            }
            false
        }
        _ = &mut send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
            true
        }
    };

    // A dispatch still in flight must finish before the departure notice
    if send_finished {
        stop_task(recv_task).await;
    }

    // Leaving the room drops the room's handle; ours is the last sender
    session.handle_close();
    drop(session);

    // Flush whatever was queued, including a pending close frame
    if !send_finished {
        if let Err(e) = send_task.await {
            tracing::error!(session_id = %session_id, error = %e, "Send task failed");
        }
    }

    tracing::info!(session_id = %session_id, room = %room_name, "WebSocket connection closed");
}

/// Abort a connection task and wait until it has actually stopped
///
/// `abort` only takes effect at the task's next await point; whatever it is
/// doing until then still runs.
async fn stop_task<T>(task: JoinHandle<T>) {
    task.abort();
    let _ = task.await;
}
