//! Room coordination service for ephemeral two-party chat.
//!
//! This library implements the server side of a code-keyed chat feature:
//! room lifecycle, membership and presence tracking, message ordering and
//! fan-out over WebSocket. Rooms hold at most two participants and live
//! only while at least one of them is connected.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
