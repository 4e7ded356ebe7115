//! Conversation update wire format.
//!
//! Updates travel as JSON objects discriminated by `kind`:
//!
//! ```text
//! {"kind":"connectedToConversation","conversationId":"…"}
//! {"kind":"message","id":"…","role":"user","content":"hi","createdAt":"2025-01-01T00:00:00.000Z"}
//! {"kind":"responsePart","userMessageId":"…","role":"assistant","responsePart":"Hel"}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{ConversationUpdate, UpdateDecodeError};

/// Conversation update as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConversationUpdateDto {
    #[serde(rename_all = "camelCase")]
    ConnectedToConversation { conversation_id: String },
    #[serde(rename_all = "camelCase")]
    Message {
        id: String,
        role: String,
        content: String,
        created_at: String,
    },
    #[serde(rename_all = "camelCase")]
    ResponsePart {
        user_message_id: String,
        role: String,
        response_part: String,
    },
}

/// Decode and validate an update from its JSON text.
pub fn parse_update(text: &str) -> Result<ConversationUpdate, UpdateDecodeError> {
    let dto = serde_json::from_str::<ConversationUpdateDto>(text)
        .map_err(|e| UpdateDecodeError::Malformed(e.to_string()))?;
    ConversationUpdate::try_from(dto)
}

/// Serialize an update to its JSON text.
pub fn encode_update(update: &ConversationUpdate) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ConversationUpdateDto::from(update))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConversationId, Role};

    const CONVERSATION_ID: &str = "3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b";
    const MESSAGE_ID: &str = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";

    #[test]
    fn test_parse_message_update() {
        // テスト項目: message 形式の JSON をドメインの更新イベントに変換できる
        // given (前提条件):
        let text = format!(
            r#"{{"kind":"message","id":"{}","role":"user","content":"hi","createdAt":"2025-01-01T00:00:00Z"}}"#,
            MESSAGE_ID
        );

        // when (操作):
        let update = parse_update(&text).unwrap();

        // then (期待する結果):
        match update {
            ConversationUpdate::Message(message) => {
                assert_eq!(message.id.as_str(), MESSAGE_ID);
                assert_eq!(message.role, Role::User);
                assert_eq!(message.content, "hi");
                assert_eq!(message.created_at.timestamp(), 1735689600);
            }
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        // テスト項目: 未知の kind はエラーになる
        // given (前提条件):
        let text = r#"{"kind":"typing","conversationId":"3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b"}"#;

        // when (操作):
        let result = parse_update(text);

        // then (期待する結果):
        assert!(matches!(result, Err(UpdateDecodeError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        // テスト項目: JSON でないテキストはエラーになる
        // when (操作):
        let result = parse_update("hello");

        // then (期待する結果):
        assert!(matches!(result, Err(UpdateDecodeError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        // テスト項目: 必須フィールドが欠けている message はエラーになる
        // given (前提条件):
        let text = format!(
            r#"{{"kind":"message","id":"{}","role":"user","content":"hi"}}"#,
            MESSAGE_ID
        );

        // when (操作):
        let result = parse_update(&text);

        // then (期待する結果):
        assert!(matches!(result, Err(UpdateDecodeError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_response_part_with_user_role() {
        // テスト項目: role が assistant 以外の responsePart はエラーになる
        // given (前提条件):
        let text = format!(
            r#"{{"kind":"responsePart","userMessageId":"{}","role":"user","responsePart":"x"}}"#,
            MESSAGE_ID
        );

        // when (操作):
        let result = parse_update(&text);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UpdateDecodeError::UnexpectedRole("user".to_string()))
        );
    }

    #[test]
    fn test_encode_connected_update() {
        // テスト項目: 接続通知が kind と camelCase のフィールドで出力される
        // given (前提条件):
        let update =
            ConversationUpdate::connected(ConversationId::new(CONVERSATION_ID.to_string()).unwrap());

        // when (操作):
        let json = encode_update(&update).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "connectedToConversation");
        assert_eq!(value["conversationId"], CONVERSATION_ID);
    }
}
