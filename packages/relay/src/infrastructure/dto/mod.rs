//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: conversation update wire format (pushed over WebSocket, submitted over HTTP)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;

pub use websocket::{encode_update, parse_update};
