//! Shared utilities for the Hibiki relay and bridge binaries.

pub mod logger;
pub mod time;
