//! コネクションレジストリの実装
//!
//! ## 実装
//!
//! - `inmemory`: DashMap を使ったプロセス内実装

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
