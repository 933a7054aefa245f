//! Command-line signaling client for Denwa.
//!
//! Joins a room, prints signaling events as they arrive and sends offers /
//! answers typed at the prompt.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::{ClientError, CommandError};
pub use runner::run_client;
