//! Room coordination server for ephemeral two-party chat.
//!
//! Accepts WebSocket connections, lets a client create or join a room by
//! short code, and fans messages out to both participants.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use sashi::{
    common::logger::setup_logger,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        BindIdentityUseCase, ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase,
        GetRoomsUseCase, JoinRoomUseCase, SendMessageUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Two-party room chat coordination server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. MessagePusher
    // 2. Registry
    // 3. UseCases
    // 4. Server

    // 1. Create MessagePusher (WebSocket implementation)
    let clients = Arc::new(Mutex::new(HashMap::new()));
    let pusher = Arc::new(WebSocketMessagePusher::new(clients));

    // 2. Create Registry (in-memory; all rooms die with the process)
    let registry = Arc::new(InMemoryRoomRegistry::new(pusher.clone()));

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let bind_identity_usecase = Arc::new(BindIdentityUseCase::new(registry.clone()));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(registry.clone(), pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(registry.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        bind_identity_usecase,
        create_room_usecase,
        join_room_usecase,
        send_message_usecase,
        get_rooms_usecase,
        pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
