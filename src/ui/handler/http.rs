//! HTTP API handlers.
//!
//! Read-only observability endpoints next to the WebSocket. They never
//! expose message contents and carry no mutation surface.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};
use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of active rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.list().await;
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by code
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_rooms_usecase.detail(&code).await {
        Some(detail) => Ok(Json(RoomDetailDto::from(detail))),
        None => Err(StatusCode::NOT_FOUND),
    }
}
