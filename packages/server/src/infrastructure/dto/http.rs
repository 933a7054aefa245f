//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthDto {
    pub status: String,
    /// Number of open signaling sessions
    pub sessions: usize,
}

/// Room summary for the room list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSummaryDto {
    pub name: String,
    /// Member identities, sorted
    pub members: Vec<String>,
    pub created_at: String,
}

/// Member detail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberDetailDto {
    pub email: String,
    #[serde(rename = "socketId")]
    pub socket_id: String,
    pub joined_at: String,
}

/// Room detail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomDetailDto {
    pub name: String,
    pub members: Vec<MemberDetailDto>,
    pub created_at: String,
}
