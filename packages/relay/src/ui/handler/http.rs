//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::ConversationId,
    infrastructure::dto::http::{ConversationSummaryDto, SubmitAcceptedDto},
    ui::state::AppState,
    usecase::SubmitError,
};

/// Submit an update for every subscriber of a conversation
pub async fn submit_update(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
    body: String,
) -> Result<Json<SubmitAcceptedDto>, (StatusCode, String)> {
    let conversation_id = ConversationId::try_from(conversation_id).map_err(|e| {
        tracing::warn!("Rejecting update: {}", e);
        (
            StatusCode::BAD_REQUEST,
            "Valid conversation ID is required".to_string(),
        )
    })?;

    match state
        .submit_update_usecase
        .execute(conversation_id, &body)
        .await
    {
        Ok(deliveries) => Ok(Json(SubmitAcceptedDto::new(deliveries))),
        Err(e @ SubmitError::InvalidUpdate(_)) => {
            tracing::warn!("Rejecting update: {}", e);
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ SubmitError::PayloadTooLarge { .. }) => {
            tracing::warn!("Rejecting update: {}", e);
            Err((StatusCode::PAYLOAD_TOO_LARGE, e.to_string()))
        }
        Err(e @ SubmitError::EncodeFailed(_)) => {
            tracing::error!("Failed to relay update: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint listing every conversation with live connections
pub async fn debug_conversations(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ConversationSummaryDto>> {
    let conversations = state.get_conversations_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(
        conversations
            .into_iter()
            .map(ConversationSummaryDto::from)
            .collect(),
    )
}
