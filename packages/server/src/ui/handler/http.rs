//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{HealthDto, RoomDetailDto, RoomSummaryDto},
    ui::state::{AppState, RoomQuery},
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        sessions: state.connect_session_usecase.count_sessions().await,
    })
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by name
///
/// A path segment cannot be empty, so the room named `""` is only reachable
/// through [`find_room`].
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    room_detail(&state, room).await
}

/// Get room detail by name given as `?name=`
pub async fn find_room(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    room_detail(&state, query.name).await
}

async fn room_detail(state: &AppState, room: String) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state
        .get_room_detail_usecase
        .execute(RoomName::new(room))
        .await
    {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(e @ GetRoomDetailError::Repository(_)) => {
            tracing::error!("Failed to read room: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
