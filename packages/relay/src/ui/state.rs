//! Server state shared by every handler.

use std::sync::Arc;

use crate::usecase::{
    ConnectSubscriberUseCase, DisconnectSubscriberUseCase, GetConversationsUseCase,
    SubmitUpdateUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSubscriberUseCase（購読者接続のユースケース）
    pub connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    /// DisconnectSubscriberUseCase（購読者切断のユースケース）
    pub disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
    /// SubmitUpdateUseCase（更新イベント投稿のユースケース）
    pub submit_update_usecase: Arc<SubmitUpdateUseCase>,
    /// GetConversationsUseCase（会話一覧取得のユースケース）
    pub get_conversations_usecase: Arc<GetConversationsUseCase>,
}
