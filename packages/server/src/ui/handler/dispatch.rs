//! Inbound message routing.
//!
//! Every text frame is decoded on its `type` field and handed to the matching
//! usecase. Payloads that cannot be decoded or addressed are logged and dropped;
//! the sender receives nothing and stays connected.

use crate::{
    domain::{Identity, RoomName, SessionId},
    infrastructure::dto::websocket::{
        CallAcceptedMessage, CallMessage, ClientMessage, JoinMessage,
    },
    ui::state::AppState,
    usecase::RelayError,
};

/// Route one inbound text payload from `session_id`.
pub(super) async fn dispatch(state: &AppState, session_id: &SessionId, text: &str) {
    let message = match ClientMessage::parse(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Dropping payload from '{}': {}", session_id, e);
            return;
        }
    };

    match message {
        ClientMessage::Join(join) => handle_join(state, session_id, join).await,
        ClientMessage::Call(call) => handle_call(state, session_id, call).await,
        ClientMessage::CallAccepted(answer) => handle_answer(state, session_id, answer).await,
    }
}

async fn handle_join(state: &AppState, session_id: &SessionId, join: JoinMessage) {
    let notification = match serde_json::to_string(&join.joined_notification(session_id)) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize joined notification: {}", e);
            return;
        }
    };
    let acknowledgement = match serde_json::to_string(&join) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize join acknowledgement: {}", e);
            return;
        }
    };

    let identity = Identity::new(join.email);
    let room_name = RoomName::new(join.room);
    match state
        .join_room_usecase
        .execute(
            session_id,
            identity,
            room_name,
            &notification,
            &acknowledgement,
        )
        .await
    {
        Ok(report) => {
            tracing::debug!(
                "Join of '{}' notified {} member(s), closed {}",
                session_id,
                report.notified.len(),
                report.closed.len()
            );
        }
        Err(e) => tracing::warn!("Join dropped: {}", e),
    }
}

async fn handle_call(state: &AppState, session_id: &SessionId, call: CallMessage) {
    let Some(target) = resolve_target(session_id, &call.peer_socket_id, "call") else {
        return;
    };
    let forwarded = call.forward_from(session_id);
    let json = match serde_json::to_string(&forwarded) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize incomingCall: {}", e);
            return;
        }
    };

    report_relay(
        "call",
        state
            .relay_signal_usecase
            .execute(session_id, &target, &json)
            .await,
    );
}

async fn handle_answer(state: &AppState, session_id: &SessionId, answer: CallAcceptedMessage) {
    let Some(target) = resolve_target(session_id, &answer.peer_socket_id, "callAccepted") else {
        return;
    };
    let forwarded = answer.forward_from(session_id);
    let json = match serde_json::to_string(&forwarded) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize callAccepted: {}", e);
            return;
        }
    };

    report_relay(
        "callAccepted",
        state
            .relay_signal_usecase
            .execute(session_id, &target, &json)
            .await,
    );
}

fn resolve_target(session_id: &SessionId, peer_socket_id: &str, kind: &str) -> Option<SessionId> {
    match SessionId::new(peer_socket_id.to_string()) {
        Ok(target) => Some(target),
        Err(_) => {
            tracing::warn!(
                "Dropping '{}' from '{}': empty peerSocketId",
                kind,
                session_id
            );
            None
        }
    }
}

fn report_relay(kind: &str, result: Result<(), RelayError>) {
    match result {
        Ok(()) => {}
        Err(RelayError::PeerNotFound(target)) => {
            tracing::warn!("Dropping '{}': peer '{}' not found", kind, target);
        }
        Err(e @ RelayError::DeliveryFailed(_)) => {
            tracing::warn!("'{}' not delivered: {}", kind, e);
        }
    }
}
