//! UseCase error types.

use thiserror::Error;

use crate::domain::RepositoryError;

/// Errors raised while accepting a new channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Every generated session ID collided with a registered one
    #[error("Could not allocate a unique session ID after {0} attempts")]
    SessionIdExhausted(usize),
}

/// Errors raised while joining a room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// The joining channel was closed before the join was applied
    #[error("Session '{0}' is no longer registered")]
    SessionClosed(String),

    #[error("Repository error: {0}")]
    Repository(#[source] RepositoryError),
}

/// Errors raised while relaying an offer or answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// No live channel has the target session ID
    #[error("Target session '{0}' not found")]
    PeerNotFound(String),

    /// Delivery to the target failed and the target was closed
    #[error("Failed to deliver to session '{0}'")]
    DeliveryFailed(String),
}

/// Errors raised while reading a room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Repository error: {0}")]
    Repository(#[source] RepositoryError),
}
