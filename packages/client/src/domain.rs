//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use denwa_server::infrastructure::dto::websocket::{
    CallAcceptedMessage, CallMessage, JoinMessage, JoinedMessage, MessageType, SessionDescription,
};

use crate::error::{ClientError, CommandError};

/// A command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send an offer to a peer
    Call { peer: String, sdp: String },
    /// Answer a peer's offer
    Accept { peer: String, sdp: String },
    /// List peers learned from `joined` events
    Peers,
    Help,
}

/// Parse one prompt line.
///
/// The SDP is the rest of the line after the peer ID, so it may contain spaces.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "call" => {
            let (peer, sdp) = split_peer_and_sdp(rest, "call <socketId> <sdp>")?;
            Ok(Command::Call { peer, sdp })
        }
        "accept" => {
            let (peer, sdp) = split_peer_and_sdp(rest, "accept <socketId> <sdp>")?;
            Ok(Command::Accept { peer, sdp })
        }
        "peers" => Ok(Command::Peers),
        "help" => Ok(Command::Help),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn split_peer_and_sdp(rest: &str, usage: &'static str) -> Result<(String, String), CommandError> {
    let (peer, sdp) = rest
        .split_once(char::is_whitespace)
        .ok_or(CommandError::MissingArgument(usage))?;
    let sdp = sdp.trim();
    if peer.is_empty() || sdp.is_empty() {
        return Err(CommandError::MissingArgument(usage));
    }
    Ok((peer.to_string(), sdp.to_string()))
}

pub fn build_join(email: &str, room: &str) -> JoinMessage {
    JoinMessage {
        r#type: MessageType::Join,
        email: email.to_string(),
        room: room.to_string(),
    }
}

pub fn build_call(peer: &str, sdp: &str) -> CallMessage {
    CallMessage {
        r#type: MessageType::Call,
        peer_socket_id: peer.to_string(),
        offer: SessionDescription {
            sdp_type: "offer".to_string(),
            sdp: sdp.to_string(),
        },
    }
}

pub fn build_answer(peer: &str, sdp: &str) -> CallAcceptedMessage {
    CallAcceptedMessage {
        r#type: MessageType::CallAccepted,
        peer_socket_id: peer.to_string(),
        answer: SessionDescription {
            sdp_type: "answer".to_string(),
            sdp: sdp.to_string(),
        },
    }
}

/// Messages the server sends to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Our own join, echoed back
    JoinAck(JoinMessage),
    Joined(JoinedMessage),
    IncomingCall(CallMessage),
    CallAccepted(CallAcceptedMessage),
}

/// Decode a server payload on its `type` field.
///
/// Returns `None` for anything that is not a known server event.
pub fn parse_server_event(text: &str) -> Option<ServerEvent> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let kind = value.get("type")?.as_str()?.to_string();

    match kind.as_str() {
        "join" => serde_json::from_value(value).ok().map(ServerEvent::JoinAck),
        "joined" => serde_json::from_value(value).ok().map(ServerEvent::Joined),
        "incomingCall" => serde_json::from_value(value)
            .ok()
            .map(ServerEvent::IncomingCall),
        "callAccepted" => serde_json::from_value(value)
            .ok()
            .map(ServerEvent::CallAccepted),
        _ => None,
    }
}

/// Peers seen in `joined` events during the current connection.
#[derive(Debug, Default)]
pub struct PeerDirectory {
    /// (email, socketId), in the order they were first seen
    peers: Vec<(String, String)>,
}

impl PeerDirectory {
    /// Record a `joined` event. A later join under the same email replaces the socket ID.
    pub fn record(&mut self, email: &str, socket_id: &str) {
        match self.peers.iter_mut().find(|(e, _)| e == email) {
            Some(entry) => entry.1 = socket_id.to_string(),
            None => self.peers.push((email.to_string(), socket_id.to_string())),
        }
    }

    pub fn peers(&self) -> &[(String, String)] {
        &self.peers
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // A bad URL will not get better by retrying
    if matches!(error, ClientError::InvalidUrl(_)) {
        return false;
    }

    current_attempt < max_attempts
}
