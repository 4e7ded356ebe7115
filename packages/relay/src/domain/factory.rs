//! Domain factories for creating domain entities and value objects.

use super::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Every accepted transport connection gets a fresh identity from here, which is what
/// the registry uses to tell two connections on the same conversation apart.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: ConnectionIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let connection_id1 = ConnectionIdFactory::generate();
        let connection_id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(connection_id1, connection_id2);
    }
}
