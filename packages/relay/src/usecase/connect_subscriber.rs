//! UseCase: 購読者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSubscriberUseCase::execute() メソッド
//! - 接続通知（connectedToConversation）の送信とレジストリへの登録
//!
//! ### なぜこのテストが必要か
//! - 新しい購読者は他のどの更新よりも先に接続通知を 1 回だけ受け取る必要がある
//! - 上限超過時に何も登録されないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規購読者の接続
//! - 異常系：会話の接続数上限超過
//! - エッジケース：登録前に受信側が閉じている

use std::sync::Arc;

use hibiki_shared::time::Clock;

use crate::{
    domain::{
        Connection, ConnectionIdFactory, ConnectionRegistry, ConversationId, ConversationUpdate,
        Payload, PusherChannel, RegistryError, Registration, Timestamp,
    },
    infrastructure::dto::encode_update,
};

use super::error::ConnectError;

/// 購読者接続のユースケース
pub struct ConnectSubscriberUseCase {
    /// ConnectionRegistry（会話ごとのコネクション集合）
    registry: Arc<dyn ConnectionRegistry>,
    /// 接続時刻の取得元
    clock: Arc<dyn Clock>,
}

impl ConnectSubscriberUseCase {
    /// 新しい ConnectSubscriberUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// 購読者の接続を実行
    ///
    /// 接続通知はレジストリへの登録より前にチャンネルへ積むため、
    /// 同時に行われるブロードキャストより必ず先に届く。
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - 購読する会話の ID（Domain Model）
    /// * `sender` - コネクションへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Registration)` - 接続成功（破棄または release で登録解除される）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        conversation_id: ConversationId,
        sender: PusherChannel,
    ) -> Result<Registration, ConnectError> {
        // 1. 接続通知をチャンネルに積む
        let connected = ConversationUpdate::connected(conversation_id.clone());
        let greeting: Payload = encode_update(&connected)
            .map_err(|e| ConnectError::EncodeFailed(e.to_string()))?
            .into();
        sender
            .send(greeting)
            .map_err(|_| ConnectError::ConnectionClosed)?;

        // 2. レジストリに登録
        let connection = Connection::new(
            ConnectionIdFactory::generate(),
            sender,
            Timestamp::new(self.clock.now_millis()),
        );
        let connection_id = connection.id;
        self.registry
            .register(conversation_id.clone(), connection)
            .map_err(|e| match e {
                RegistryError::ConversationFull {
                    conversation_id,
                    limit,
                } => ConnectError::ConversationFull {
                    conversation_id,
                    limit,
                },
            })?;

        Ok(Registration::new(
            self.registry.clone(),
            conversation_id,
            connection_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{dto::parse_update, registry::InMemoryConnectionRegistry};
    use hibiki_shared::time::FixedClock;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn create_usecase(
        registry: Arc<InMemoryConnectionRegistry>,
    ) -> ConnectSubscriberUseCase {
        ConnectSubscriberUseCase::new(registry, Arc::new(FixedClock::new(1000)))
    }

    #[tokio::test]
    async fn test_connect_subscriber_success() {
        // テスト項目: 新規購読者が登録され、接続通知を受け取る
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = create_usecase(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let registration = usecase.execute(conversation_id.clone(), tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(registry.connection_count(&conversation_id), 1);
        assert_eq!(registration.conversation_id(), &conversation_id);
        let greeting = rx.recv().await.unwrap();
        assert_eq!(
            parse_update(&greeting).unwrap(),
            ConversationUpdate::connected(conversation_id.clone())
        );

        let snapshots = registry.conversations();
        assert_eq!(snapshots[0].connections[0].connected_at, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_connected_notification_precedes_broadcasts() {
        // テスト項目: 接続通知はその後のブロードキャストより先に 1 回だけ届く
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = create_usecase(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _registration = usecase.execute(conversation_id.clone(), tx).await.unwrap();

        // when (操作):
        registry.broadcast(&conversation_id, Payload::from("first"));
        registry.broadcast(&conversation_id, Payload::from("second"));

        // then (期待する結果):
        let greeting = rx.recv().await.unwrap();
        assert!(greeting.contains("connectedToConversation"));
        assert_eq!(rx.recv().await.as_deref(), Some("first"));
        assert_eq!(rx.recv().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_connect_subscriber_conversation_full() {
        // テスト項目: 会話の接続数上限を超えるとエラーになり、登録されない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::with_limit(Some(1)));
        let usecase = create_usecase(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let _first = usecase.execute(conversation_id.clone(), tx1).await.unwrap();

        // when (操作):
        let result = usecase.execute(conversation_id.clone(), tx2).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ConnectError::ConversationFull { limit: 1, .. })
        ));
        assert_eq!(registry.connection_count(&conversation_id), 1);
    }

    #[tokio::test]
    async fn test_connect_subscriber_with_closed_channel() {
        // テスト項目: 受信側が既に閉じている場合は登録しない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = create_usecase(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = usecase.execute(conversation_id.clone(), tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectError::ConnectionClosed)));
        assert_eq!(registry.conversation_count(), 0);
    }

    #[tokio::test]
    async fn test_dropping_registration_unregisters() {
        // テスト項目: Registration を破棄すると登録が解除される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = create_usecase(registry.clone());
        let conversation_id = ConversationId::from_uuid(Uuid::new_v4());
        let (tx, _rx) = mpsc::unbounded_channel();
        let registration = usecase.execute(conversation_id.clone(), tx).await.unwrap();

        // when (操作):
        drop(registration);

        // then (期待する結果):
        assert_eq!(registry.conversation_count(), 0);
    }
}
