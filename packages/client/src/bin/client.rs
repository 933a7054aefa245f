//! WebRTC signaling client.
//!
//! Connects to a Denwa signaling server, joins a room and prints signaling
//! events. Offers and answers are typed at the prompt:
//!
//! ```text
//! call <socketId> <sdp>
//! accept <socketId> <sdp>
//! peers
//! help
//! ```
//!
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval)
//! and joins the room again.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin denwa-client -- --email alice@example.com --room r1
//! cargo run --bin denwa-client -- -e bob@example.com -r r1 -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use denwa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "denwa-client")]
#[command(about = "WebRTC signaling client", long_about = None)]
struct Args {
    /// Identity announced to the room
    #[arg(short = 'e', long)]
    email: String,

    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("denwa_client", env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = denwa_client::run_client(args.url, args.email, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
