//! Conversation update relay server.
//!
//! Subscribers connect over WebSocket to `/conversations/{conversation_id}/updates`;
//! updates POSTed to the same path are pushed to every subscriber of that conversation.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hibiki-relay
//! cargo run --bin hibiki-relay -- --host 0.0.0.0 --port 3000 --max-connections-per-conversation 16
//! ```

use std::sync::Arc;

use clap::Parser;
use hibiki_relay::{
    infrastructure::registry::InMemoryConnectionRegistry,
    ui::Server,
    usecase::{
        ConnectSubscriberUseCase, DisconnectSubscriberUseCase, GetConversationsUseCase,
        SubmitUpdateUseCase,
    },
};
use hibiki_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hibiki-relay")]
#[command(about = "WebSocket relay for conversation updates", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8082")]
    port: u16,

    /// Maximum number of simultaneous connections per conversation (unbounded if omitted)
    #[arg(long)]
    max_connections_per_conversation: Option<usize>,

    /// Maximum size of a submitted update in bytes (unbounded if omitted)
    #[arg(long)]
    max_payload_bytes: Option<usize>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. Server

    // 1. Create Registry (in-memory)
    let registry = Arc::new(InMemoryConnectionRegistry::with_limit(
        args.max_connections_per_conversation,
    ));
    let clock = Arc::new(SystemClock);

    // 2. Create UseCases
    let connect_subscriber_usecase = Arc::new(ConnectSubscriberUseCase::new(
        registry.clone(),
        clock.clone(),
    ));
    let disconnect_subscriber_usecase =
        Arc::new(DisconnectSubscriberUseCase::new(registry.clone()));
    let submit_update_usecase = Arc::new(SubmitUpdateUseCase::new(
        registry.clone(),
        args.max_payload_bytes,
    ));
    let get_conversations_usecase = Arc::new(GetConversationsUseCase::new(registry.clone()));

    // 3. Create and run the server
    let server = Server::new(
        connect_subscriber_usecase,
        disconnect_subscriber_usecase,
        submit_update_usecase,
        get_conversations_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
