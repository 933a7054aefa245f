//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use serde::Serialize;
use tokio::{net::TcpStream, sync::Mutex, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use denwa_shared::time::get_timestamp_millis;

use crate::{
    domain::{
        Command, PeerDirectory, ServerEvent, build_answer, build_call, build_join, parse_command,
        parse_server_event,
    },
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run one connection: join the room, then print events and send commands
/// until the user exits or the connection drops.
///
/// # Returns
///
/// * `Ok(())` - the user closed the prompt
/// * `Err(ClientError)` - the connection could not be established or was lost
pub async fn run_client_session(
    url: &str,
    email: &str,
    room: &str,
    prompt: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(e) => ClientError::InvalidUrl(e.to_string()),
        e => ClientError::ConnectionError(e.to_string()),
    })?;

    tracing::info!("Connected to signaling server!");
    println!(
        "\nYou are '{}' in room '{}'. Type 'help' for commands. Press Ctrl+C to exit.\n",
        email, room
    );

    let (mut write, mut read) = ws_stream.split();

    // 接続直後に join を送信（再接続時も同様）
    send_json(&mut write, &build_join(email, room))
        .await
        .map_err(|_| ClientError::ConnectionLost)?;

    let peers = Arc::new(Mutex::new(PeerDirectory::default()));

    // Spawn a task to handle incoming messages
    let peers_for_read = peers.clone();
    let prompt_for_read = prompt.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let output = match message {
                Ok(Message::Text(text)) => format_event(text.as_str(), &peers_for_read).await,
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", output);
            redisplay_prompt(&prompt_for_read);
        }
    });

    // Handle prompt input until the user exits or a write fails
    let input_loop = async {
        while let Some(line) = input_rx.recv().await {
            let sent = match parse_command(&line) {
                Ok(Command::Call { peer, sdp }) => {
                    let result = send_json(&mut write, &build_call(&peer, &sdp)).await;
                    result.map(|()| sent_confirmation("offer", &peer))
                }
                Ok(Command::Accept { peer, sdp }) => {
                    let result = send_json(&mut write, &build_answer(&peer, &sdp)).await;
                    result.map(|()| sent_confirmation("answer", &peer))
                }
                Ok(Command::Peers) => {
                    let directory = peers.lock().await;
                    Ok(MessageFormatter::format_peers(directory.peers()))
                }
                Ok(Command::Help) => Ok(MessageFormatter::format_help()),
                Err(e) => Ok(format!("{}\n", e)),
            };

            match sent {
                Ok(output) => {
                    print!("{}", output);
                    redisplay_prompt(prompt);
                }
                Err(e) => {
                    tracing::warn!("Failed to send message: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
            }
        }
        Ok(())
    };

    // If any one of the tasks completes, stop the other
    tokio::select! {
        _ = &mut read_task => Err(ClientError::ConnectionLost),
        result = input_loop => {
            read_task.abort();
            result
        }
    }
}

/// Decode a server payload and render it, updating the peer list on `joined`.
async fn format_event(text: &str, peers: &Mutex<PeerDirectory>) -> String {
    let received_at = get_timestamp_millis();
    match parse_server_event(text) {
        Some(ServerEvent::JoinAck(join)) => {
            MessageFormatter::format_join_ack(&join.email, &join.room, received_at)
        }
        Some(ServerEvent::Joined(joined)) => {
            peers.lock().await.record(&joined.email, &joined.socket_id);
            MessageFormatter::format_joined(&joined.email, &joined.socket_id, received_at)
        }
        Some(ServerEvent::IncomingCall(call)) => MessageFormatter::format_incoming_call(
            &call.peer_socket_id,
            &call.offer.sdp,
            received_at,
        ),
        Some(ServerEvent::CallAccepted(answer)) => MessageFormatter::format_call_accepted(
            &answer.peer_socket_id,
            &answer.answer.sdp,
            received_at,
        ),
        None => MessageFormatter::format_raw_message(text),
    }
}

fn sent_confirmation(kind: &str, peer: &str) -> String {
    MessageFormatter::format_sent_confirmation(kind, peer, get_timestamp_millis())
}

async fn send_json<T: Serialize>(
    write: &mut WsWriter,
    message: &T,
) -> Result<(), tungstenite::Error> {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize message: {}", e);
            return Ok(());
        }
    };
    write.send(Message::Text(json.into())).await
}
