//! Notification formatting for terminal output.

use chrono::SecondsFormat;
use clap::ValueEnum;

use crate::notification::{ConversationNotification, PresentationRole};

/// Output format of the bridge CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Notification formatter for terminal display
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// Format a notification in the requested output format
    pub fn format(
        notification: &ConversationNotification,
        format: OutputFormat,
    ) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(Self::format_text(notification)),
            OutputFormat::Json => serde_json::to_string(notification),
        }
    }

    /// Format a notification as a human-readable line
    ///
    /// # Arguments
    ///
    /// * `notification` - The notification to display
    ///
    /// # Returns
    ///
    /// A single line without a trailing newline
    pub fn format_text(notification: &ConversationNotification) -> String {
        match notification {
            ConversationNotification::ConnectedToConversation { conversation_id } => {
                format!("== connected to conversation {} ==", conversation_id)
            }
            ConversationNotification::ConversationMessage {
                id,
                role,
                content,
                created_at,
            } => format!(
                "[{}] {} ({}): {}",
                created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                role_label(*role),
                id,
                content
            ),
            ConversationNotification::ResponsePart {
                user_message_id,
                role,
                response_part,
            } => format!(
                "... {} (reply to {}): {}",
                role_label(*role),
                user_message_id,
                response_part
            ),
        }
    }
}

fn role_label(role: PresentationRole) -> &'static str {
    match role {
        PresentationRole::User => "user",
        PresentationRole::Assistant => "assistant",
    }
}
