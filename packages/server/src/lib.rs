//! WebRTC signaling server library.
//!
//! Peers join named rooms over a websocket, learn about each other through
//! `joined` notifications, and exchange SDP offers/answers that the server
//! relays to a peer addressed by its session id.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
