//! Presentation model handed to downstream subscribers.

use chrono::{DateTime, Utc};
use hibiki_relay::domain::{ConversationUpdate, Role};
use serde::Serialize;

/// Author role as presented downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PresentationRole {
    User,
    Assistant,
}

impl From<Role> for PresentationRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            // Only user and assistant are distinguished downstream.
            Role::Assistant | Role::System => Self::Assistant,
        }
    }
}

/// A conversation update translated for a downstream subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConversationNotification {
    #[serde(rename_all = "camelCase")]
    ConnectedToConversation { conversation_id: String },
    #[serde(rename_all = "camelCase")]
    ConversationMessage {
        id: String,
        role: PresentationRole,
        content: String,
        created_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    ResponsePart {
        user_message_id: String,
        role: PresentationRole,
        response_part: String,
    },
}

impl From<ConversationUpdate> for ConversationNotification {
    fn from(update: ConversationUpdate) -> Self {
        match update {
            ConversationUpdate::ConnectedToConversation { conversation_id } => {
                Self::ConnectedToConversation {
                    conversation_id: conversation_id.into_string(),
                }
            }
            ConversationUpdate::Message(message) => Self::ConversationMessage {
                id: message.id.into_string(),
                role: message.role.into(),
                content: message.content,
                created_at: message.created_at,
            },
            ConversationUpdate::ResponsePart(part) => Self::ResponsePart {
                role: part.role().into(),
                user_message_id: part.user_message_id.into_string(),
                response_part: part.response_part,
            },
        }
    }
}
