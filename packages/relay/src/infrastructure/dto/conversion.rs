//! Conversion logic between DTOs and domain entities.

use chrono::{DateTime, SecondsFormat, Utc};
use hibiki_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ConversationId, ConversationSnapshot, ConversationUpdate, Message, MessageId, ResponsePart,
    Role, UpdateDecodeError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::ConversationUpdateDto> for ConversationUpdate {
    type Error = UpdateDecodeError;

    fn try_from(dto: dto::ConversationUpdateDto) -> Result<Self, Self::Error> {
        match dto {
            dto::ConversationUpdateDto::ConnectedToConversation { conversation_id } => {
                Ok(Self::connected(ConversationId::new(conversation_id)?))
            }
            dto::ConversationUpdateDto::Message {
                id,
                role,
                content,
                created_at,
            } => {
                let created_at = DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|_| UpdateDecodeError::InvalidCreatedAt(created_at.clone()))?
                    .with_timezone(&Utc);
                Ok(Self::Message(Message::new(
                    MessageId::new(id)?,
                    Role::try_from(role.as_str())?,
                    content,
                    created_at,
                )))
            }
            dto::ConversationUpdateDto::ResponsePart {
                user_message_id,
                role,
                response_part,
            } => {
                if Role::try_from(role.as_str()) != Ok(Role::Assistant) {
                    return Err(UpdateDecodeError::UnexpectedRole(role));
                }
                Ok(Self::ResponsePart(ResponsePart::new(
                    MessageId::new(user_message_id)?,
                    response_part,
                )))
            }
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ConversationUpdate> for dto::ConversationUpdateDto {
    fn from(model: &ConversationUpdate) -> Self {
        match model {
            ConversationUpdate::ConnectedToConversation { conversation_id } => {
                Self::ConnectedToConversation {
                    conversation_id: conversation_id.as_str().to_string(),
                }
            }
            ConversationUpdate::Message(message) => Self::Message {
                id: message.id.as_str().to_string(),
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
                created_at: message
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            ConversationUpdate::ResponsePart(part) => Self::ResponsePart {
                user_message_id: part.user_message_id.as_str().to_string(),
                role: part.role().as_str().to_string(),
                response_part: part.response_part.clone(),
            },
        }
    }
}

impl From<ConversationSnapshot> for http::ConversationSummaryDto {
    fn from(model: ConversationSnapshot) -> Self {
        Self {
            conversation_id: model.conversation_id.into_string(),
            connections: model
                .connections
                .into_iter()
                .map(|connection| http::ConnectionDetailDto {
                    connection_id: connection.id.to_string(),
                    connected_at: timestamp_to_rfc3339(connection.connected_at.value()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, ConnectionInfo, Timestamp, ValueObjectError};

    const MESSAGE_ID: &str = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";

    #[test]
    fn test_dto_response_part_to_domain() {
        // テスト項目: DTO の responsePart がドメインエンティティに変換される
        // given (前提条件):
        let dto_part = dto::ConversationUpdateDto::ResponsePart {
            user_message_id: MESSAGE_ID.to_string(),
            role: "assistant".to_string(),
            response_part: "Hel".to_string(),
        };

        // when (操作):
        let update = ConversationUpdate::try_from(dto_part).unwrap();

        // then (期待する結果):
        assert_eq!(
            update,
            ConversationUpdate::ResponsePart(ResponsePart::new(
                MessageId::new(MESSAGE_ID.to_string()).unwrap(),
                "Hel".to_string()
            ))
        );
    }

    #[test]
    fn test_dto_message_with_invalid_id_is_rejected() {
        // テスト項目: UUID でない id を持つ message は値オブジェクトのエラーになる
        // given (前提条件):
        let dto_msg = dto::ConversationUpdateDto::Message {
            id: "m1".to_string(),
            role: "user".to_string(),
            content: "hi".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };

        // when (操作):
        let result = ConversationUpdate::try_from(dto_msg);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UpdateDecodeError::InvalidValue(
                ValueObjectError::MessageIdInvalidFormat("m1".to_string())
            ))
        );
    }

    #[test]
    fn test_dto_message_with_invalid_created_at_is_rejected() {
        // テスト項目: RFC 3339 でない createdAt はエラーになる
        // given (前提条件):
        let dto_msg = dto::ConversationUpdateDto::Message {
            id: MESSAGE_ID.to_string(),
            role: "user".to_string(),
            content: "hi".to_string(),
            created_at: "yesterday".to_string(),
        };

        // when (操作):
        let result = ConversationUpdate::try_from(dto_msg);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UpdateDecodeError::InvalidCreatedAt("yesterday".to_string()))
        );
    }

    #[test]
    fn test_domain_message_to_dto() {
        // テスト項目: ドメインの message が RFC 3339 (UTC, ミリ秒) の createdAt を持つ DTO に変換される
        // given (前提条件):
        let created_at = DateTime::parse_from_rfc3339("2025-01-01T09:00:00+09:00")
            .unwrap()
            .with_timezone(&Utc);
        let update = ConversationUpdate::Message(Message::new(
            MessageId::new(MESSAGE_ID.to_string()).unwrap(),
            Role::System,
            "be nice".to_string(),
            created_at,
        ));

        // when (操作):
        let dto_msg = dto::ConversationUpdateDto::from(&update);

        // then (期待する結果):
        assert_eq!(
            dto_msg,
            dto::ConversationUpdateDto::Message {
                id: MESSAGE_ID.to_string(),
                role: "system".to_string(),
                content: "be nice".to_string(),
                created_at: "2025-01-01T00:00:00.000Z".to_string(),
            }
        );
    }

    #[test]
    fn test_snapshot_to_summary_dto() {
        // テスト項目: レジストリのスナップショットがデバッグ用 DTO に変換される
        // given (前提条件):
        let connection_id = ConnectionIdFactory::generate();
        let snapshot = ConversationSnapshot {
            conversation_id: ConversationId::new(MESSAGE_ID.to_string()).unwrap(),
            connections: vec![ConnectionInfo {
                id: connection_id,
                connected_at: Timestamp::new(1672531200000),
            }],
        };

        // when (操作):
        let summary = http::ConversationSummaryDto::from(snapshot);

        // then (期待する結果):
        assert_eq!(summary.conversation_id, MESSAGE_ID);
        assert_eq!(summary.connections.len(), 1);
        assert_eq!(summary.connections[0].connection_id, connection_id.to_string());
        assert_eq!(summary.connections[0].connected_at, "2023-01-01T00:00:00.000Z");
    }
}
