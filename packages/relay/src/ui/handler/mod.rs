//! Request handlers.

mod http;
mod websocket;

pub use http::{debug_conversations, health_check, submit_update};
pub use websocket::websocket_handler;
