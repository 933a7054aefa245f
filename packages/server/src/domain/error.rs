//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Session ID must not be empty")]
    EmptySessionId,
}

/// Errors raised by the session repository
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A session with the same ID is already registered
    #[error("Session '{0}' is already registered")]
    DuplicateSession(String),

    /// The session is not (or no longer) registered
    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    /// The room has never been created
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// Errors raised when pushing a message to a client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound channel is registered for the session
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// The outbound channel is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
