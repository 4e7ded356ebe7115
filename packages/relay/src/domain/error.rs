//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConversationId validation error
    #[error("ConversationId cannot be empty")]
    ConversationIdEmpty,

    /// ConversationId invalid format error (not a valid UUID format)
    #[error("ConversationId must be a valid UUID format (got: {0})")]
    ConversationIdInvalidFormat(String),

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageId invalid format error (not a valid UUID format)
    #[error("MessageId must be a valid UUID format (got: {0})")]
    MessageIdInvalidFormat(String),

    /// Role is not one of user / assistant / system
    #[error("Role must be one of 'user', 'assistant' or 'system' (got: {0})")]
    RoleInvalid(String),
}

/// Errors raised while decoding a conversation update from its wire form
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateDecodeError {
    /// The payload is not JSON or does not match any update variant
    #[error("Malformed update payload: {0}")]
    Malformed(String),

    /// A field failed value object validation
    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),

    /// A response part carried a role other than assistant
    #[error("Response part role must be 'assistant' (got: {0})")]
    UnexpectedRole(String),

    /// createdAt is not an RFC 3339 timestamp
    #[error("createdAt must be an RFC 3339 timestamp (got: {0})")]
    InvalidCreatedAt(String),
}

/// Errors related to the connection registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The conversation already holds the configured maximum of connections
    #[error("Conversation {conversation_id} is full: maximum {limit} connections allowed")]
    ConversationFull {
        conversation_id: String,
        limit: usize,
    },
}
