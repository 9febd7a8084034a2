//! WebSocket Event DTOs - Data Transfer Objects per eventi WebSocket

use crate::dtos::MessageDTO;
use serde::{Deserialize, Serialize};

/// Tagged union per eventi WebSocket
/// Serde serializza questo come:
/// { "type": "NewMessage", "data": { ... } }
/// oppure
/// { "type": "Send", "data": { "content": "...", "recipient_link_id": null } }
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WsEventDTO {
    /// server -> client
    NewMessage(MessageDTO),
    /// client -> server
    Send {
        content: String,
        #[serde(default)]
        recipient_link_id: Option<i32>,
    },
    Error { code: u16, message: String },
}
