//! Conversion logic between DTOs and domain entities.

use denwa_shared::time::timestamp_to_rfc3339;

use crate::domain::{Identity, Room, SessionId};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            members: room
                .member_identities()
                .into_iter()
                .map(Identity::into_string)
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            members: room
                .members()
                .map(|(identity, membership)| http::MemberDetailDto {
                    email: identity.as_str().to_string(),
                    socket_id: membership.session_id.as_str().to_string(),
                    joined_at: timestamp_to_rfc3339(membership.joined_at.value()),
                })
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

// ========================================
// Inbound → outbound signaling messages
// ========================================

impl dto::JoinMessage {
    /// Notification sent to the other room members.
    pub fn joined_notification(&self, socket_id: &SessionId) -> dto::JoinedMessage {
        dto::JoinedMessage {
            r#type: dto::MessageType::Joined,
            email: self.email.clone(),
            socket_id: socket_id.as_str().to_string(),
        }
    }
}

impl dto::CallMessage {
    /// Offer as delivered to the target: `incomingCall`, addressed back to `sender`.
    pub fn forward_from(self, sender: &SessionId) -> dto::CallMessage {
        dto::CallMessage {
            r#type: dto::MessageType::IncomingCall,
            peer_socket_id: sender.as_str().to_string(),
            offer: self.offer,
        }
    }
}

impl dto::CallAcceptedMessage {
    /// Answer as delivered to the target, addressed back to `sender`.
    pub fn forward_from(self, sender: &SessionId) -> dto::CallAcceptedMessage {
        dto::CallAcceptedMessage {
            r#type: dto::MessageType::CallAccepted,
            peer_socket_id: sender.as_str().to_string(),
            answer: self.answer,
        }
    }
}
