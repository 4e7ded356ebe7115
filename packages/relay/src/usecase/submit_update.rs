//! UseCase: 更新イベントの投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitUpdateUseCase::execute() メソッド
//! - ペイロードの検証、1 回だけのシリアライズ、会話の全購読者へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 不正なペイロードは誰にも配信されてはならない
//! - 購読者がいない会話への投稿は黙って破棄される（バッファしない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：N 購読者への配信（N 回の配送試行）
//! - 異常系：不正な JSON、スキーマ違反、サイズ超過
//! - エッジケース：購読者 0 人

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, ConversationId, Payload},
    infrastructure::dto::{encode_update, parse_update},
};

use super::error::SubmitError;

/// 更新イベント投稿のユースケース
pub struct SubmitUpdateUseCase {
    /// ConnectionRegistry（会話ごとのコネクション集合）
    registry: Arc<dyn ConnectionRegistry>,
    /// ペイロードの最大バイト数（None なら無制限）
    max_payload_bytes: Option<usize>,
}

impl SubmitUpdateUseCase {
    /// 新しい SubmitUpdateUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>, max_payload_bytes: Option<usize>) -> Self {
        Self {
            registry,
            max_payload_bytes,
        }
    }

    /// 更新イベントの投稿を実行
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - 配信先の会話 ID（Domain Model）
    /// * `raw_update` - 投稿された JSON テキスト
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配送を試みたコネクション数
    /// * `Err(SubmitError)` - 検証に失敗（何も配信されない）
    pub async fn execute(
        &self,
        conversation_id: ConversationId,
        raw_update: &str,
    ) -> Result<usize, SubmitError> {
        // 1. サイズ検証
        if let Some(max) = self.max_payload_bytes
            && raw_update.len() > max
        {
            return Err(SubmitError::PayloadTooLarge {
                max,
                actual: raw_update.len(),
            });
        }

        // 2. スキーマ検証
        let update = parse_update(raw_update)?;

        // 3. 一度だけシリアライズして全購読者に同じバイト列を送る
        let payload: Payload = encode_update(&update)
            .map_err(|e| SubmitError::EncodeFailed(e.to_string()))?
            .into();
        let deliveries = self.registry.broadcast(&conversation_id, payload);

        tracing::debug!(
            "Submitted {} update to conversation {} ({} deliveries)",
            update.kind(),
            conversation_id,
            deliveries
        );

        Ok(deliveries)
    }
}
