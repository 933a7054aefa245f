//! Shared application state.

use std::sync::Arc;

use serde::Deserialize;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
    JoinRoomUseCase, RelaySignalUseCase,
};

/// Query parameters for the room lookup by name
#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    pub name: String,
}

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// JoinRoomUseCase（Room 参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelaySignalUseCase（offer / answer 転送のユースケース）
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
