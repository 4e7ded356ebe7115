//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! 会話 ID → コネクション集合のマップを DashMap で保持します。
//!
//! ## 設計ノート
//!
//! - 同じ会話に対する登録・解除・ブロードキャストは DashMap のエントリロックで直列化される
//! - 異なる会話の操作は別エントリを触るため互いを待たない
//! - ロック中に `.await` しない（送信は UnboundedSender への push のみ）
//! - 集合が空になった会話はその場でマップから削除する

use std::collections::HashMap;

use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{
    Connection, ConnectionId, ConnectionInfo, ConnectionRegistry, ConversationId,
    ConversationSnapshot, Payload, RegistryError,
};

/// インメモリ ConnectionRegistry 実装
#[derive(Debug, Default)]
pub struct InMemoryConnectionRegistry {
    /// Key: 会話 ID, Value: その会話を購読中のコネクション（ConnectionId で同一性を判定）
    conversations: DashMap<ConversationId, HashMap<ConnectionId, Connection>>,
    /// 会話あたりの最大コネクション数（None なら無制限）
    max_connections_per_conversation: Option<usize>,
}

impl InMemoryConnectionRegistry {
    /// 無制限のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 会話あたりのコネクション数に上限を設けたレジストリを作成
    pub fn with_limit(max_connections_per_conversation: Option<usize>) -> Self {
        Self {
            conversations: DashMap::new(),
            max_connections_per_conversation,
        }
    }

    /// マップに存在する会話の数
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    fn conversation_full(&self, conversation_id: &ConversationId, limit: usize) -> RegistryError {
        tracing::warn!(
            "Conversation {} reached its limit of {} connections",
            conversation_id,
            limit
        );
        RegistryError::ConversationFull {
            conversation_id: conversation_id.as_str().to_string(),
            limit,
        }
    }
}

impl ConnectionRegistry for InMemoryConnectionRegistry {
    fn register(
        &self,
        conversation_id: ConversationId,
        connection: Connection,
    ) -> Result<(), RegistryError> {
        let connection_id = connection.id;
        match self.conversations.entry(conversation_id.clone()) {
            Entry::Occupied(mut entry) => {
                let connections = entry.get_mut();
                if let Some(limit) = self.max_connections_per_conversation
                    && connections.len() >= limit
                    && !connections.contains_key(&connection_id)
                {
                    return Err(self.conversation_full(&conversation_id, limit));
                }
                connections.insert(connection_id, connection);
            }
            Entry::Vacant(entry) => {
                if self.max_connections_per_conversation == Some(0) {
                    return Err(self.conversation_full(&conversation_id, 0));
                }
                entry.insert(HashMap::from([(connection_id, connection)]));
            }
        }

        tracing::debug!(
            "Connection {} registered to conversation {}",
            connection_id,
            conversation_id
        );
        Ok(())
    }

    fn unregister(&self, conversation_id: &ConversationId, connection_id: ConnectionId) -> bool {
        let removed = match self.conversations.entry(conversation_id.clone()) {
            Entry::Occupied(mut entry) => {
                let removed = entry.get_mut().remove(&connection_id).is_some();
                if entry.get().is_empty() {
                    entry.remove();
                    tracing::debug!("Conversation {} has no connections left", conversation_id);
                }
                removed
            }
            Entry::Vacant(_) => false,
        };

        if removed {
            tracing::debug!(
                "Connection {} unregistered from conversation {}",
                connection_id,
                conversation_id
            );
        }
        removed
    }

    fn broadcast(&self, conversation_id: &ConversationId, payload: Payload) -> usize {
        // get_mut で書き込みロックを取り、同じ会話への送信順を全購読者で揃える
        let Some(connections) = self.conversations.get_mut(conversation_id) else {
            tracing::debug!(
                "No connections for conversation {}, dropping update",
                conversation_id
            );
            return 0;
        };

        for connection in connections.values() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = connection.sender.send(payload.clone()) {
                tracing::warn!(
                    "Failed to push update to connection {}: {}",
                    connection.id,
                    e
                );
            }
        }
        tracing::debug!(
            "Broadcasted update to {} connection(s) of conversation {}",
            connections.len(),
            conversation_id
        );
        connections.len()
    }

    fn connection_count(&self, conversation_id: &ConversationId) -> usize {
        self.conversations
            .get(conversation_id)
            .map(|connections| connections.len())
            .unwrap_or(0)
    }

    fn conversations(&self) -> Vec<ConversationSnapshot> {
        let mut snapshots: Vec<ConversationSnapshot> = self
            .conversations
            .iter()
            .map(|entry| {
                let mut connections: Vec<ConnectionInfo> = entry
                    .value()
                    .values()
                    .map(|connection| ConnectionInfo {
                        id: connection.id,
                        connected_at: connection.connected_at,
                    })
                    .collect();
                connections.sort_by_key(|connection| (connection.connected_at, connection.id));
                ConversationSnapshot {
                    conversation_id: entry.key().clone(),
                    connections,
                }
            })
            .collect();

        // Sort by conversation_id for consistent ordering
        snapshots.sort_by(|a, b| a.conversation_id.cmp(&b.conversation_id));
        snapshots
    }
}
