//! Transport seam between the bridge and the relay.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use hibiki_relay::domain::ConversationId;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::error::{BridgeError, TransportError};

/// Opens relay connections scoped to one conversation
#[async_trait]
pub trait RelayConnector: Send + Sync {
    async fn connect(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Box<dyn RelayConnection>, BridgeError>;
}

/// One open relay connection
///
/// `next_text` yields `None` once the relay closed the connection.
#[async_trait]
pub trait RelayConnection: Send {
    async fn next_text(&mut self) -> Option<Result<String, TransportError>>;
    async fn close(&mut self);
}

/// Connector for the relay's WebSocket endpoint
#[derive(Debug, Clone)]
pub struct WebSocketRelayConnector {
    base_url: String,
}

impl WebSocketRelayConnector {
    /// Create a connector for a relay base URL such as `ws://127.0.0.1:8082`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// URL of the update stream of one conversation
    pub fn updates_url(&self, conversation_id: &ConversationId) -> String {
        format!(
            "{}/conversations/{}/updates",
            self.base_url,
            conversation_id.as_str()
        )
    }
}

#[async_trait]
impl RelayConnector for WebSocketRelayConnector {
    async fn connect(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Box<dyn RelayConnection>, BridgeError> {
        let url = self.updates_url(conversation_id);
        tracing::debug!("Connecting to {}", url);

        match connect_async(url.as_str()).await {
            Ok((stream, _response)) => Ok(Box::new(WebSocketRelayConnection { stream })),
            Err(WsError::Http(response)) => Err(BridgeError::Rejected(response.status().as_u16())),
            Err(e) => Err(BridgeError::ConnectionError(e.to_string())),
        }
    }
}

struct WebSocketRelayConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl RelayConnection for WebSocketRelayConnection {
    async fn next_text(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_owned())),
                Ok(Message::Close(_)) => {
                    tracing::debug!("Relay closed the connection");
                    return None;
                }
                Ok(Message::Binary(data)) => {
                    tracing::debug!("Ignoring {} bytes of binary data", data.len());
                }
                // ping/pong are answered by tungstenite itself
                Ok(_) => {}
                Err(e) => return Some(Err(TransportError::WebSocket(e.to_string()))),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!("Closing relay connection failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONVERSATION_ID: &str = "3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b";

    #[test]
    fn test_updates_url() {
        // テスト項目: ベース URL の末尾スラッシュに関係なく購読 URL を組み立てられる
        // given (前提条件):
        let conversation_id = ConversationId::new(CONVERSATION_ID.to_string()).unwrap();
        let connector = WebSocketRelayConnector::new("ws://127.0.0.1:8082/");

        // when (操作):
        let url = connector.updates_url(&conversation_id);

        // then (期待する結果):
        assert_eq!(
            url,
            format!("ws://127.0.0.1:8082/conversations/{}/updates", CONVERSATION_ID)
        );
    }
}
