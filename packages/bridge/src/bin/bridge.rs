//! Command-line subscriber for a conversation's updates.
//!
//! Connects to the relay, prints each notification, and reopens the subscription when
//! the connection is lost (bounded attempts).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hibiki-bridge -- --conversation-id 3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b
//! cargo run --bin hibiki-bridge -- -c 3f2b8c1e-6a4d-4e2f-9b7a-1c2d3e4f5a6b --format json
//! ```

use std::time::Duration;

use clap::Parser;
use hibiki_bridge::{
    formatter::OutputFormat,
    runner::{ReconnectPolicy, run_bridge},
};
use hibiki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hibiki-bridge")]
#[command(about = "Subscribe to a conversation's updates through the relay", long_about = None)]
struct Args {
    /// Conversation ID to follow (UUID)
    #[arg(short = 'c', long)]
    conversation_id: String,

    /// Relay base URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8082")]
    url: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Maximum number of consecutive reconnect attempts
    #[arg(long, default_value_t = 5)]
    max_reconnect_attempts: u32,

    /// Seconds to wait between reconnect attempts
    #[arg(long, default_value_t = 5)]
    reconnect_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let policy = ReconnectPolicy {
        max_attempts: args.max_reconnect_attempts,
        interval: Duration::from_secs(args.reconnect_interval_secs),
    };

    if let Err(e) = run_bridge(args.url, args.conversation_id, args.format, policy).await {
        tracing::error!("Bridge error: {}", e);
        std::process::exit(1);
    }
}
