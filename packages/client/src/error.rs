//! Error types for the signaling client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL cannot be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was closed or failed
    #[error("Connection lost")]
    ConnectionLost,
}

/// Errors raised while parsing a prompt command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for the list of commands)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),
}
