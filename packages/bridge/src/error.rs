//! Error types for the subscription bridge.

use hibiki_relay::domain::ValueObjectError;
use thiserror::Error;

/// Errors raised by a single relay connection after it was established
#[derive(Debug, Error)]
pub enum TransportError {
    /// The WebSocket failed while reading
    #[error("WebSocket error: {0}")]
    WebSocket(String),
}

/// Errors raised while opening a subscription
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The conversation id is not a valid UUID
    #[error("Invalid conversation ID: {0}")]
    InvalidConversationId(#[from] ValueObjectError),

    /// The relay answered the upgrade request with an error status
    #[error("Relay rejected the subscription with HTTP {0}")]
    Rejected(u16),

    /// The relay could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl BridgeError {
    /// Whether retrying the same subscription can never succeed
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidConversationId(_) => true,
            // 503 means the conversation is full right now
            Self::Rejected(status) => *status != 503,
            Self::ConnectionError(_) => false,
        }
    }
}
