//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::usecase::{
    BindIdentityUseCase, ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase,
    GetRoomsUseCase, JoinRoomUseCase, SendMessageUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat coordination server
///
/// This struct encapsulates the server configuration and provides methods
/// to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     bind_identity_usecase,
///     create_room_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     get_rooms_usecase,
///     pusher,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    bind_identity_usecase: Arc<BindIdentityUseCase>,
    create_room_usecase: Arc<CreateRoomUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    pusher: Arc<dyn MessagePusher>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        bind_identity_usecase: Arc<BindIdentityUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            bind_identity_usecase,
            create_room_usecase,
            join_room_usecase,
            send_message_usecase,
            get_rooms_usecase,
            pusher,
        }
    }

    /// Build the router for this server
    ///
    /// Exposed separately so tests can serve the app on an ephemeral port.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            bind_identity_usecase: self.bind_identity_usecase,
            create_room_usecase: self.create_room_usecase,
            join_room_usecase: self.join_room_usecase,
            send_message_usecase: self.send_message_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            pusher: self.pusher,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{code}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket chat coordination server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Chat coordination server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
