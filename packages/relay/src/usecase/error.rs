//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::UpdateDecodeError;

/// Errors raised while connecting a subscriber
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The conversation already holds the configured maximum of connections
    #[error("Conversation {conversation_id} is full (limit: {limit})")]
    ConversationFull {
        conversation_id: String,
        limit: usize,
    },

    /// The connection's outbound channel closed before registration finished
    #[error("Connection closed before it could be registered")]
    ConnectionClosed,

    /// The connected notification could not be encoded
    #[error("Failed to encode update: {0}")]
    EncodeFailed(String),
}

/// Errors raised while submitting an update
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The payload exceeds the configured maximum size
    #[error("Update payload too large: maximum {max} bytes (got {actual})")]
    PayloadTooLarge { max: usize, actual: usize },

    /// The payload does not decode to a valid update
    #[error("Invalid update: {0}")]
    InvalidUpdate(#[from] UpdateDecodeError),

    /// The decoded update could not be encoded again
    #[error("Failed to encode update: {0}")]
    EncodeFailed(String),
}
