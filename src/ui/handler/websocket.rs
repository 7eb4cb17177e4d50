//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::domain::ConnectionId;
use crate::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use crate::ui::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // 接続ごとにサーバー側で connectionRef を採番する。クライアントが
    // 申告する userId とは独立。
    let conn = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    state.connect_client_usecase.execute(conn.clone(), tx).await;
    tracing::info!("Connection '{}' established", conn);

    let (sender, receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(recv_loop(receiver, state.clone(), conn.clone()));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // クローズが正常・異常のどちらでも、退出処理はこの 1 箇所を必ず通る
    match state.disconnect_client_usecase.execute(&conn).await {
        Some(code) => {
            tracing::info!("Connection '{}' closed and left room '{}'", conn, code);
        }
        None => {
            tracing::info!("Connection '{}' closed", conn);
        }
    }
}

/// Spawns a task that receives events from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This handles the outbound flow: events queued for this connection
/// (fan-out, replies, errors) are written to its WebSocket. A slow socket
/// only delays its own queue.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Receive loop for one connection: parse inbound events and dispatch them.
async fn recv_loop(mut receiver: SplitStream<WebSocket>, state: Arc<AppState>, conn: ConnectionId) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error on '{}': {}", conn, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => dispatch_event(&state, &conn, &text).await,
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", conn);
                break;
            }
            _ => {}
        }
    }
}

async fn dispatch_event(state: &Arc<AppState>, conn: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse event from '{}': {}", conn, e);
            send_error(state, conn, "unrecognized event").await;
            return;
        }
    };

    match event {
        ClientEvent::SetUserId { user_id } => {
            match state.bind_identity_usecase.execute(conn, user_id).await {
                Ok(user_id) => {
                    tracing::info!("Connection '{}' bound user id '{}'", conn, user_id);
                }
                Err(e) => send_error(state, conn, &e.to_string()).await,
            }
        }
        ClientEvent::CreateRoom => match state.create_room_usecase.execute(conn).await {
            Ok(code) => {
                tracing::info!("Connection '{}' created room '{}'", conn, code);
            }
            Err(e) => send_error(state, conn, &e.to_string()).await,
        },
        ClientEvent::JoinRoom { room_code } => {
            match state.join_room_usecase.execute(conn, room_code).await {
                Ok(snapshot) => {
                    tracing::info!(
                        "Connection '{}' joined room '{}' ({} messages replayed)",
                        conn,
                        snapshot.code,
                        snapshot.messages.len()
                    );
                }
                Err(e) => send_error(state, conn, &e.to_string()).await,
            }
        }
        // roomCode / userId はクライアントの自己申告なので使わない
        ClientEvent::SendMessage { message, .. } => {
            match state.send_message_usecase.execute(conn, message).await {
                Ok(message) => {
                    tracing::debug!(
                        "Connection '{}' sent message '{}'",
                        conn,
                        message.id.as_str()
                    );
                }
                Err(e) => send_error(state, conn, &e.to_string()).await,
            }
        }
    }
}

/// 発生元の接続のみに error イベントを届ける
async fn send_error(state: &Arc<AppState>, conn: &ConnectionId, message: &str) {
    let event = serde_json::to_string(&ServerEvent::Error {
        message: message.to_string(),
    })
    .expect("server events always serialize");
    if let Err(e) = state.pusher.push_to(conn, &event).await {
        tracing::warn!("Failed to push error to '{}': {}", conn, e);
    }
}
