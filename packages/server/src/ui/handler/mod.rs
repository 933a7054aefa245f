//! Request handlers.

mod dispatch;
mod http;
mod session_guard;
mod websocket;

pub use http::{find_room, get_room_detail, get_rooms, health_check};
pub use websocket::websocket_handler;
