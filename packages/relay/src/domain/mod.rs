//! Domain layer for the conversation update relay.
//!
//! This module contains the update model, identifiers and the registry seam,
//! independent of wire DTOs and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod registry;
pub mod value_object;

pub use entity::{ConversationUpdate, Message, ResponsePart};
pub use error::{RegistryError, UpdateDecodeError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use registry::{
    Connection, ConnectionInfo, ConnectionRegistry, ConversationSnapshot, Payload, PusherChannel,
    Registration,
};
#[cfg(test)]
pub use registry::MockConnectionRegistry;
pub use value_object::{ConnectionId, ConversationId, MessageId, Role, Timestamp};
