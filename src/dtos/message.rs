//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::{Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageDTO {
    pub message_id: i32,
    pub chat_id: i32,
    pub sender_role: Role,
    pub sender_name: String,
    pub content: String,
    pub recipient_link_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            message_id: value.message_id,
            chat_id: value.chat_id,
            sender_role: value.sender_role,
            sender_name: value.sender_name,
            content: value.content,
            recipient_link_id: value.recipient_link_id,
            created_at: value.created_at,
        }
    }
}

impl From<&Message> for MessageDTO {
    fn from(value: &Message) -> Self {
        Self::from(value.clone())
    }
}

/// DTO per creare un nuovo messaggio (senza message_id né created_at, assegnati dal DB)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateMessageDTO {
    pub chat_id: i32,
    pub sender_role: Role,
    pub sender_name: String,
    pub content: String,
    pub recipient_link_id: Option<i32>,
    /// Link of the sender; the insert is rejected if it is no longer active
    pub sender_link_id: Option<i32>,
}

/// Body di POST /chats/{chat_id}/messages
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SendMessageDTO {
    #[validate(length(min = 1, max = 5000, message = "Message content must be between 1 and 5000 characters"))]
    pub content: String,

    #[serde(default)]
    pub recipient_link_id: Option<i32>,
}
