//! WebSocket Module - Realtime fan-out verso i client connessi
//!
//! - `chatmap`: un canale broadcast per ogni chat con almeno un viewer
//! - `subscription`: handle filtrato per viewer, cancellabile
//! - `connection`: task di lettura/scrittura di un singolo socket

pub mod chatmap;
pub mod connection;
pub mod subscription;

pub use chatmap::ChatMap;
pub use connection::handle_socket;
pub use subscription::Subscription;

use crate::core::{AppError, AppState};
use crate::pod::Participant;
use axum::{
    Extension,
    extract::{Path, State, ws::WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

pub const BROADCAST_CHANNEL_CAPACITY: usize = 256;
pub const TIMEOUT_DURATION_SECONDS: u64 = 300;
pub const RATE_LIMITER_MILLIS: u64 = 10;

/// Entry point per gestire richieste di upgrade WebSocket
///
/// Il participant arriva già risolto dall'identity middleware.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    Extension(participant): Extension<Participant>,
) -> Result<Response, AppError> {
    if participant.chat_id() != chat_id {
        warn!("Participant resolved for another chat");
        return Err(AppError::forbidden("Link does not belong to this chat"));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, participant)))
}
