//! HTTP API response DTOs for the relay.

use serde::{Deserialize, Serialize};

/// Response body of an accepted update submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAcceptedDto {
    pub status: String,
    /// Number of connections the update was pushed to
    pub deliveries: usize,
}

impl SubmitAcceptedDto {
    pub fn new(deliveries: usize) -> Self {
        Self {
            status: "accepted".to_string(),
            deliveries,
        }
    }
}

/// Conversation summary for the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummaryDto {
    pub conversation_id: String,
    pub connections: Vec<ConnectionDetailDto>,
}

/// Connection detail for the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDetailDto {
    pub connection_id: String,
    pub connected_at: String, // ISO 8601
}
