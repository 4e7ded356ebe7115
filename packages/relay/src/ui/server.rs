//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectSubscriberUseCase, DisconnectSubscriberUseCase, GetConversationsUseCase,
    SubmitUpdateUseCase,
};

use super::{
    handler::{debug_conversations, health_check, submit_update, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Conversation update relay server
///
/// This struct encapsulates the server wiring and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_subscriber_usecase,
///     disconnect_subscriber_usecase,
///     submit_update_usecase,
///     get_conversations_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8082).await?;
/// ```
pub struct Server {
    connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
    submit_update_usecase: Arc<SubmitUpdateUseCase>,
    get_conversations_usecase: Arc<GetConversationsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
        disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
        submit_update_usecase: Arc<SubmitUpdateUseCase>,
        get_conversations_usecase: Arc<GetConversationsUseCase>,
    ) -> Self {
        Self {
            connect_subscriber_usecase,
            disconnect_subscriber_usecase,
            submit_update_usecase,
            get_conversations_usecase,
        }
    }

    /// Build the router with every endpoint of the relay
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_subscriber_usecase: self.connect_subscriber_usecase,
            disconnect_subscriber_usecase: self.disconnect_subscriber_usecase,
            submit_update_usecase: self.submit_update_usecase,
            get_conversations_usecase: self.get_conversations_usecase,
        });

        Router::new()
            // WebSocket エンドポイント（GET）と更新投稿（POST）は同じパス
            .route(
                "/conversations/{conversation_id}/updates",
                get(websocket_handler).post(submit_update),
            )
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/conversations", get(debug_conversations))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8082)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Conversation relay listening on {}", listener.local_addr()?);
        tracing::info!(
            "Subscribe at: ws://{}/conversations/{{conversation_id}}/updates",
            bind_addr
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
