//! Conversation update relay.
//!
//! Fans out conversation updates submitted over HTTP to every WebSocket
//! subscriber of the same conversation.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
