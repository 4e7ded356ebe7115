//! CLI execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use crate::{
    error::BridgeError,
    formatter::{NotificationFormatter, OutputFormat},
    subscription::{Bridge, Subscription},
    transport::WebSocketRelayConnector,
};

/// How often and how fast to reopen a lost subscription
#[derive(Debug, Clone, Copy)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

enum SessionEnd {
    Interrupted,
    ConnectionLost,
}

/// Follow one conversation and print every notification to stdout
///
/// A lost connection opens a new subscription; subscriptions are never restarted.
/// Validation errors and rejected upgrades end the run immediately.
pub async fn run_bridge(
    url: String,
    conversation_id: String,
    format: OutputFormat,
    policy: ReconnectPolicy,
) -> Result<(), BridgeError> {
    let bridge = Bridge::new(Arc::new(WebSocketRelayConnector::new(url.clone())));
    let mut failures = 0;

    loop {
        tracing::info!(
            "Subscribing to {} at {} (attempt {}/{})",
            conversation_id,
            url,
            failures + 1,
            policy.max_attempts
        );

        match bridge.subscribe(&conversation_id).await {
            Ok(subscription) => {
                failures = 0;
                match print_notifications(subscription, format).await {
                    SessionEnd::Interrupted => {
                        tracing::info!("Interrupted, subscription closed");
                        return Ok(());
                    }
                    SessionEnd::ConnectionLost => {
                        tracing::warn!("Connection to the relay was lost");
                    }
                }
            }
            Err(e) if e.is_fatal() => {
                tracing::error!("{}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Failed to subscribe: {}", e);
            }
        }

        failures += 1;
        if failures >= policy.max_attempts {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                policy.max_attempts
            );
            return Err(BridgeError::ConnectionError(format!(
                "gave up after {} attempts",
                policy.max_attempts
            )));
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            policy.interval.as_secs(),
            failures + 1,
            policy.max_attempts
        );
        tokio::time::sleep(policy.interval).await;
    }
}

async fn print_notifications(mut subscription: Subscription, format: OutputFormat) -> SessionEnd {
    loop {
        let notification = tokio::select! {
            _ = tokio::signal::ctrl_c() => None,
            notification = subscription.next() => Some(notification),
        };

        match notification {
            None => {
                subscription.close().await;
                return SessionEnd::Interrupted;
            }
            Some(None) => return SessionEnd::ConnectionLost,
            Some(Some(notification)) => match NotificationFormatter::format(&notification, format) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to format notification: {}", e),
            },
        }
    }
}
