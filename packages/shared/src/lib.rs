//! Utilities shared by the Denwa signaling server and client.

pub mod logger;
pub mod time;
