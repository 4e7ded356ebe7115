//! Conversation update events.
//!
//! Updates are transient facts about a conversation. They are built once, then only
//! serialized and forwarded; nothing mutates them after construction.

use chrono::{DateTime, Utc};

use super::value_object::{ConversationId, MessageId, Role};

/// A complete conversation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(id: MessageId, role: Role, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            role,
            content,
            created_at,
        }
    }
}

/// A fragment of an assistant response that is still being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePart {
    /// The user message this response answers
    pub user_message_id: MessageId,
    /// The text fragment
    pub response_part: String,
}

impl ResponsePart {
    /// Create a new response part
    pub fn new(user_message_id: MessageId, response_part: String) -> Self {
        Self {
            user_message_id,
            response_part,
        }
    }

    /// Response parts are always authored by the assistant
    pub fn role(&self) -> Role {
        Role::Assistant
    }
}

/// A tagged update about a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationUpdate {
    /// Sent once to a connection right after it joins a conversation
    ConnectedToConversation { conversation_id: ConversationId },
    /// A complete message was added to the conversation
    Message(Message),
    /// A fragment of an in-flight assistant response
    ResponsePart(ResponsePart),
}

impl ConversationUpdate {
    /// Build the peer-joined update for a conversation
    pub fn connected(conversation_id: ConversationId) -> Self {
        Self::ConnectedToConversation { conversation_id }
    }

    /// Wire name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectedToConversation { .. } => "connectedToConversation",
            Self::Message(_) => "message",
            Self::ResponsePart(_) => "responsePart",
        }
    }
}
