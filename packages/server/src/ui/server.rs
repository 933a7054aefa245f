//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
    JoinRoomUseCase, RelaySignalUseCase,
};

use super::{
    handler::{find_room, get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebRTC signaling server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     disconnect_session_usecase,
///     join_room_usecase,
///     relay_signal_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_session_usecase` - UseCase for accepting a channel
    /// * `disconnect_session_usecase` - UseCase for closing a channel
    /// * `join_room_usecase` - UseCase for `join`
    /// * `relay_signal_usecase` - UseCase for `call` / `callAccepted`
    /// * `get_rooms_usecase` - UseCase for the room list
    /// * `get_room_detail_usecase` - UseCase for a single room
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_session_usecase,
                disconnect_session_usecase,
                join_room_usecase,
                relay_signal_usecase,
                get_rooms_usecase,
                get_room_detail_usecase,
            }),
        }
    }

    /// Build the router with every endpoint mounted
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            .route("/api/room", get(find_room))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the signaling server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Signaling server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
