use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::ServerEvent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("room code must not be empty")]
    EmptyRoomCode,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("dial value {0} is outside 0..=100")]
    ScaleValueOutOfRange(i64),
}

/// Human-readable failure reported by the game server.
///
/// Shown to the player verbatim; the client never retries on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ServerError {
    pub message: String,
}

impl ServerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ServerError> for ServerEvent {
    fn from(value: ServerError) -> Self {
        ServerEvent::Error(value)
    }
}
