//! UseCase: 購読中の会話一覧取得

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, ConversationSnapshot};

/// 会話一覧取得のユースケース
pub struct GetConversationsUseCase {
    /// ConnectionRegistry（会話ごとのコネクション集合）
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetConversationsUseCase {
    /// 新しい GetConversationsUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 購読者が 1 人以上いる会話の一覧を取得（会話 ID 順）
    pub async fn execute(&self) -> Vec<ConversationSnapshot> {
        self.registry.conversations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockConnectionRegistry;

    #[tokio::test]
    async fn test_get_conversations_empty() {
        // テスト項目: 購読者がいない場合は空のリストが返される
        // given (前提条件):
        let mut registry = MockConnectionRegistry::new();
        registry.expect_conversations().times(1).returning(Vec::new);
        let usecase = GetConversationsUseCase::new(Arc::new(registry));

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert!(result.is_empty());
    }
}
