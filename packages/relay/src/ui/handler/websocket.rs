//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConversationId, Payload, Registration},
    ui::state::AppState,
    usecase::ConnectError,
};

/// Accept a subscriber for one conversation.
///
/// The connection is registered before the upgrade completes so that capacity errors
/// can still be answered with an HTTP status. If the upgrade never happens, dropping
/// the `Registration` held by the upgrade callback unregisters it again.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> ConversationId (Domain Model)
    let conversation_id = match ConversationId::try_from(conversation_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting subscription: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this connection to receive updates
    let (tx, rx) = mpsc::unbounded_channel();

    match state
        .connect_subscriber_usecase
        .execute(conversation_id.clone(), tx)
        .await
    {
        Ok(registration) => {
            tracing::debug!(
                "Connection {} registered for conversation {}",
                registration.connection_id(),
                conversation_id
            );
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, registration, rx)))
        }
        Err(ConnectError::ConversationFull { limit, .. }) => {
            tracing::warn!(
                "Conversation {} is full ({} connections). Rejecting connection.",
                conversation_id,
                limit
            );
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(e) => {
            tracing::error!(
                "Failed to register connection for conversation {}: {}",
                conversation_id,
                e
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Spawns a task that drains the connection's channel into the WebSocket sink.
///
/// The loop ends when the registry drops the channel's sender (the connection was
/// unregistered) or when a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Payload>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(payload.to_string().into())).await {
                tracing::debug!("Failed to write update to socket: {}", e);
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    registration: Registration,
    rx: mpsc::UnboundedReceiver<Payload>,
) {
    let conversation_id = registration.conversation_id().clone();
    let connection_id = registration.connection_id();
    tracing::info!(
        "Connection {} subscribed to conversation {}",
        connection_id,
        conversation_id
    );

    let (sender, mut receiver) = socket.split();

    // Subscribers only listen; inbound frames are read to observe Close and errors.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::debug!("Connection {} requested close", connection_id);
                    break;
                }
                Ok(Message::Text(text)) => {
                    tracing::debug!(
                        "Ignoring {} bytes of text from connection {}",
                        text.len(),
                        connection_id
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error on connection {}: {}", connection_id, e);
                    break;
                }
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let outcome = state
        .disconnect_subscriber_usecase
        .execute(registration)
        .await;
    tracing::info!(
        "Connection {} left conversation {} ({} remaining)",
        connection_id,
        conversation_id,
        outcome.remaining
    );
}
