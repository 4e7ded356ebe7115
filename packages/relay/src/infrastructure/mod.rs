//! Infrastructure layer: wire DTOs and the in-memory connection registry.

pub mod dto;
pub mod registry;
