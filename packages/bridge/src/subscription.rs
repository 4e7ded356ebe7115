//! Subscriptions to a conversation's updates.
//!
//! Each subscription owns exactly one relay connection. A reader task decodes the
//! frames arriving on it and feeds a [`RendezvousQueue`]; the consumer pulls from the
//! queue. However consumption ends, the reader closes the connection once and ends
//! the queue.

use std::sync::Arc;

use futures_util::Stream;
use hibiki_relay::{domain::ConversationId, infrastructure::dto::parse_update};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    error::BridgeError,
    notification::ConversationNotification,
    queue::RendezvousQueue,
    transport::{RelayConnection, RelayConnector},
};

type NotificationQueue = RendezvousQueue<ConversationNotification>;

/// Opens subscriptions against a relay
#[derive(Clone)]
pub struct Bridge {
    connector: Arc<dyn RelayConnector>,
}

impl Bridge {
    pub fn new(connector: Arc<dyn RelayConnector>) -> Self {
        Self { connector }
    }

    /// Open a new subscription to one conversation.
    ///
    /// The id is validated before any connection is attempted.
    pub async fn subscribe(&self, conversation_id: &str) -> Result<Subscription, BridgeError> {
        let conversation_id = ConversationId::new(conversation_id.to_string())?;
        let connection = self.connector.connect(&conversation_id).await?;
        tracing::info!("Subscribed to conversation {}", conversation_id);

        let queue = Arc::new(NotificationQueue::new());
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let cancel = CancelHandle {
            queue: queue.clone(),
            signal: Arc::new(cancel_tx),
        };
        let reader = tokio::spawn(read_loop(
            conversation_id.clone(),
            connection,
            queue.clone(),
            cancel_rx,
        ));

        Ok(Subscription {
            conversation_id,
            queue,
            cancel,
            reader: Some(reader),
        })
    }
}

/// Ends a subscription from any task
#[derive(Clone)]
pub struct CancelHandle {
    queue: Arc<NotificationQueue>,
    signal: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// End the sequence now and ask the reader to close the connection.
    ///
    /// A consumer waiting in [`Subscription::next`] is released with `None`.
    pub fn cancel(&self) {
        self.queue.abort();
        self.signal.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }
}

/// A lazily produced, non-restartable sequence of notifications for one conversation
pub struct Subscription {
    conversation_id: ConversationId,
    queue: Arc<NotificationQueue>,
    cancel: CancelHandle,
    reader: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wait for the next notification. `None` means the subscription has ended.
    pub async fn next(&mut self) -> Option<ConversationNotification> {
        self.queue.next().await
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Cancel and wait until the relay connection has been closed.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(reader) = self.reader.take()
            && let Err(e) = reader.await
        {
            tracing::warn!("Subscription reader for {} failed: {}", self.conversation_id, e);
        }
    }

    /// Consume the subscription as a stream. Dropping the stream cancels it.
    pub fn into_stream(self) -> impl Stream<Item = ConversationNotification> + Send + Unpin {
        Box::pin(futures_util::stream::unfold(self, |mut subscription| async move {
            let notification = subscription.next().await?;
            Some((notification, subscription))
        }))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn read_loop(
    conversation_id: ConversationId,
    mut connection: Box<dyn RelayConnection>,
    queue: Arc<NotificationQueue>,
    mut cancelled: watch::Receiver<bool>,
) {
    loop {
        let frame = tokio::select! {
            biased;
            // Err means every handle is gone, which also ends the subscription.
            _ = cancelled.changed() => {
                tracing::debug!("Subscription to {} cancelled", conversation_id);
                break;
            }
            frame = connection.next_text() => frame,
        };

        match frame {
            Some(Ok(text)) => match parse_update(&text) {
                Ok(update) => {
                    if !queue.push(ConversationNotification::from(update)) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Dropping undecodable update for {}: {}", conversation_id, e);
                }
            },
            Some(Err(e)) => {
                tracing::warn!("Connection for {} failed: {}", conversation_id, e);
                break;
            }
            None => {
                tracing::info!("Relay closed the subscription to {}", conversation_id);
                break;
            }
        }
    }

    connection.close().await;
    queue.close();
}
