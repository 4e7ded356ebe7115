//! UseCase: 購読者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSubscriberUseCase::execute() メソッド
//! - Registration の解放によるレジストリからの削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：購読者の切断
//! - エッジケース：最後の購読者の切断（会話エントリの削除）
//! - エッジケース：既に解除済みのコネクション

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, Registration};

/// 切断処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// 今回の呼び出しでレジストリから削除されたか
    pub removed: bool,
    /// 会話に残っているコネクション数
    pub remaining: usize,
}

/// 購読者切断のユースケース
pub struct DisconnectSubscriberUseCase {
    /// ConnectionRegistry（会話ごとのコネクション集合）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectSubscriberUseCase {
    /// 新しい DisconnectSubscriberUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 購読者の切断を実行
    ///
    /// `Registration` を消費するため、同じコネクションを二度解除することはできない。
    pub async fn execute(&self, registration: Registration) -> DisconnectOutcome {
        let conversation_id = registration.conversation_id().clone();
        let connection_id = registration.connection_id();

        let removed = registration.release();
        let remaining = self.registry.connection_count(&conversation_id);

        tracing::debug!(
            "Connection {} left conversation {} ({} remaining)",
            connection_id,
            conversation_id,
            remaining
        );

        DisconnectOutcome { removed, remaining }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConversationId, Registration},
        infrastructure::registry::InMemoryConnectionRegistry,
        usecase::ConnectSubscriberUseCase,
    };
    use hibiki_shared::time::SystemClock;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    async fn connect(
        registry: Arc<InMemoryConnectionRegistry>,
        conversation_id: &ConversationId,
    ) -> (Registration, mpsc::UnboundedReceiver<crate::domain::Payload>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let registration = ConnectSubscriberUseCase::new(registry, Arc::new(SystemClock))
            .execute(conversation_id.clone(), tx)
            .await
            .unwrap();
        (registration, rx)
    }

    #[tokio::test]
    async fn test_disconnect_subscriber_success() {
        // テスト項目: 購読者が切断されると他の購読者だけが残る
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectSubscriberUseCase::new(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (alice, _rx_a) = connect(registry.clone(), &conversation_id).await;
        let (_bob, _rx_b) = connect(registry.clone(), &conversation_id).await;

        // when (操作):
        let outcome = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            DisconnectOutcome {
                removed: true,
                remaining: 1
            }
        );
    }

    #[tokio::test]
    async fn test_disconnect_last_subscriber_removes_conversation() {
        // テスト項目: 最後の購読者が切断されると会話のエントリが削除される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectSubscriberUseCase::new(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (alice, _rx) = connect(registry.clone(), &conversation_id).await;

        // when (操作):
        let outcome = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(outcome.remaining, 0);
        assert_eq!(registry.conversation_count(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_already_unregistered_connection() {
        // テスト項目: 既に解除済みのコネクションの切断はエラーにならず removed = false
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectSubscriberUseCase::new(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (alice, _rx) = connect(registry.clone(), &conversation_id).await;
        registry.unregister(&conversation_id, alice.connection_id());

        // when (操作):
        let outcome = usecase.execute(alice).await;

        // then (期待する結果):
        assert!(!outcome.removed);
        assert_eq!(outcome.remaining, 0);
    }
}
