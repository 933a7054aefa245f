//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::ui::state::AppState;

use super::{dispatch::dispatch, session_guard::SessionGuard};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the session's outbound queue onto the WebSocket.
///
/// The queue ends when the session is unregistered from the MessagePusher; the
/// task then sends a close frame so the peer sees the channel go away.
///
/// # Arguments
///
/// * `rx` - Outbound queue of this session
/// * `sender` - WebSocket sink to write to
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::warn!("Failed to write to WebSocket: {}", e);
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // 送信キューを作成し、セッションを登録
    let (tx, rx) = mpsc::unbounded_channel();
    let session = match state.connect_session_usecase.execute(tx).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Rejecting connection: {}", e);
            return;
        }
    };
    let session_id = session.id;
    tracing::info!("Session '{}' connected", session_id);

    let disconnect_usecase = state.disconnect_session_usecase.clone();
    let guard = SessionGuard::new(session_id.clone(), disconnect_usecase);
    let (sender, mut receiver) = socket.split();

    // Spawn a task to read and route this session's messages in order
    let session_id_clone = session_id.clone();
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", session_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", session_id_clone, text.as_str());
                    dispatch(&state_clone, &session_id_clone, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from '{}'", session_id_clone);
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id_clone);
                    break;
                }
            }
        }
    });

    // Spawn a task to write queued messages to this session
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let outcome = guard.release().await;
    if outcome.was_registered {
        tracing::info!("Session '{}' disconnected", session_id);
    }
}
