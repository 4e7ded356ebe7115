//! Subscription bridge for the conversation update relay.
//!
//! A [`Bridge`] opens one relay connection per subscription and exposes the updates
//! arriving on it as an ordered, cancellable sequence of [`ConversationNotification`]s.

pub mod error;
pub mod formatter;
pub mod notification;
pub mod queue;
pub mod runner;
pub mod subscription;
pub mod transport;

pub use error::{BridgeError, TransportError};
pub use notification::{ConversationNotification, PresentationRole};
pub use subscription::{Bridge, CancelHandle, Subscription};
pub use transport::{RelayConnection, RelayConnector, WebSocketRelayConnector};
