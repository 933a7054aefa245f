//! UseCase layer
//!
//! Domain の Repository / MessagePusher を組み合わせてシグナリングの各操作を実装します。

mod connect_session;
mod disconnect_session;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod relay_signal;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{ConnectError, GetRoomDetailError, JoinError, RelayError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinReport, JoinRoomUseCase};
pub use relay_signal::RelaySignalUseCase;
