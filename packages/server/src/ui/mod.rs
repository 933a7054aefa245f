//! WebRTC signaling server: routing, connection handling and the HTTP API.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
