//! ConnectionRegistry trait 定義
//!
//! 会話 ID ごとに接続中のコネクション集合を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use tokio::sync::mpsc;

use super::{ConnectionId, ConversationId, RegistryError, Timestamp};

/// Serialized update, shared by every connection it is pushed to
pub type Payload = Arc<str>;

/// Channel feeding one connection's socket writer
pub type PusherChannel = mpsc::UnboundedSender<Payload>;

/// An open connection owned by the registry
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub sender: PusherChannel,
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: ConnectionId, sender: PusherChannel, connected_at: Timestamp) -> Self {
        Self {
            id,
            sender,
            connected_at,
        }
    }
}

/// Read-only view of a registered connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

/// Read-only view of a conversation and its connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSnapshot {
    pub conversation_id: ConversationId,
    pub connections: Vec<ConnectionInfo>,
}

/// Connection registry trait
///
/// Maps a conversation to the set of connections watching it. A conversation is
/// present iff at least one connection is registered for it.
///
/// All operations on the same conversation are serialized; operations on different
/// conversations proceed independently. Implementations must never await while
/// holding a conversation's lock.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectionRegistry: Send + Sync {
    /// Add a connection to a conversation, creating the conversation entry if absent
    fn register(
        &self,
        conversation_id: ConversationId,
        connection: Connection,
    ) -> Result<(), RegistryError>;

    /// Remove a connection. Returns `false` if it was not registered.
    fn unregister(&self, conversation_id: &ConversationId, connection_id: ConnectionId) -> bool;

    /// Push a payload to every connection of a conversation.
    ///
    /// Returns the number of delivery attempts. A failed push to one connection does not
    /// affect the others.
    fn broadcast(&self, conversation_id: &ConversationId, payload: Payload) -> usize;

    /// Number of connections registered for a conversation
    fn connection_count(&self, conversation_id: &ConversationId) -> usize;

    /// Snapshot of every conversation with at least one connection
    fn conversations(&self) -> Vec<ConversationSnapshot>;
}

/// Ownership of one registered connection.
///
/// Releasing (explicitly or by dropping) unregisters the connection exactly once.
pub struct Registration {
    registry: Arc<dyn ConnectionRegistry>,
    conversation_id: ConversationId,
    connection_id: ConnectionId,
    released: bool,
}

impl Registration {
    /// Wrap an already registered connection
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        conversation_id: ConversationId,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            registry,
            conversation_id,
            connection_id,
            released: false,
        }
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Unregister the connection. Returns whether it was still registered.
    pub fn release(mut self) -> bool {
        self.released = true;
        self.registry
            .unregister(&self.conversation_id, self.connection_id)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if !self.released {
            tracing::debug!(
                "Registration of connection {} dropped, unregistering from conversation {}",
                self.connection_id,
                self.conversation_id
            );
            self.registry
                .unregister(&self.conversation_id, self.connection_id);
        }
    }
}
