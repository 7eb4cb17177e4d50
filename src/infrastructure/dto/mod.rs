//! Data Transfer Objects (DTOs) for the chat coordinator.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (the client/server event contract)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
