//! WebRTC signaling server.
//!
//! Relays `join` / `call` / `callAccepted` messages between WebSocket clients
//! grouped into rooms.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin denwa-server
//! cargo run --bin denwa-server -- --host 0.0.0.0 --port 3000 --log-level info
//! ```

use std::sync::Arc;

use clap::Parser;
use denwa_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    },
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinRoomUseCase, RelaySignalUseCase,
    },
};
use denwa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "denwa-server")]
#[command(about = "WebRTC signaling server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger("denwa_server", env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory signaling registry)
    let repository = Arc::new(InMemorySessionRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_session_usecase,
        disconnect_session_usecase,
        join_room_usecase,
        relay_signal_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
