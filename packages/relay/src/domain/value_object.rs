//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Parse a UUID in any accepted textual form and return its canonical hyphenated form.
fn canonical_uuid(id: &str) -> Option<String> {
    Uuid::parse_str(id)
        .ok()
        .map(|uuid| uuid.hyphenated().to_string())
}

/// Conversation identifier value object.
///
/// Always holds a canonical (lowercase, hyphenated) UUID so that subscribers and
/// submitters address the same registry key regardless of the casing they used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new ConversationId.
    ///
    /// # Arguments
    ///
    /// * `id` - The conversation identifier string (UUID format)
    ///
    /// # Returns
    ///
    /// A Result containing the ConversationId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConversationIdEmpty);
        }
        canonical_uuid(&id)
            .map(Self)
            .ok_or(ValueObjectError::ConversationIdInvalidFormat(id))
    }

    /// Create a ConversationId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConversationId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Create a new MessageId from a UUID string.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::MessageIdEmpty);
        }
        canonical_uuid(&id)
            .map(Self)
            .ok_or(ValueObjectError::MessageIdInvalidFormat(id))
    }

    /// Create a MessageId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(ValueObjectError::RoleInvalid(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a single transport connection.
///
/// Minted once per accepted connection; two connections never share an id even
/// when they watch the same conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_new_success() {
        // テスト項目: 有効な UUID から ConversationId を作成できる
        // given (前提条件):
        let id = "3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b".to_string();

        // when (操作):
        let result = ConversationId::new(id.clone());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), id);
    }

    #[test]
    fn test_conversation_id_is_canonicalized() {
        // テスト項目: 大文字の UUID は小文字のハイフン区切り形式に正規化される
        // given (前提条件):
        let upper = "3F2B8C1E-6A4D-4E2F-9B7A-1C2D3E4F5A6B".to_string();

        // when (操作):
        let id = ConversationId::new(upper).unwrap();

        // then (期待する結果):
        assert_eq!(id.as_str(), "3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b");
    }

    #[test]
    fn test_conversation_id_empty_error() {
        // テスト項目: 空文字列の ConversationId はエラーになる
        // when (操作):
        let result = ConversationId::new(String::new());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::ConversationIdEmpty));
    }

    #[test]
    fn test_conversation_id_invalid_format_error() {
        // テスト項目: UUID 形式でない ConversationId はエラーになる
        // when (操作):
        let result = ConversationId::new("default".to_string());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::ConversationIdInvalidFormat(
                "default".to_string()
            ))
        );
    }

    #[test]
    fn test_message_id_invalid_format_error() {
        // テスト項目: UUID 形式でない MessageId はエラーになる
        // when (操作):
        let result = MessageId::new("m1".to_string());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::MessageIdInvalidFormat("m1".to_string()))
        );
    }

    #[test]
    fn test_role_try_from() {
        // テスト項目: 文字列から Role に変換でき、未知のロールはエラーになる
        // then (期待する結果):
        assert_eq!(Role::try_from("user"), Ok(Role::User));
        assert_eq!(Role::try_from("assistant"), Ok(Role::Assistant));
        assert_eq!(Role::try_from("system"), Ok(Role::System));
        assert_eq!(
            Role::try_from("Admin"),
            Err(ValueObjectError::RoleInvalid("Admin".to_string()))
        );
    }
}
