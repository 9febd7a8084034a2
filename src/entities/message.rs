//! Message entity - Entità messaggio

use super::enums::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable once stored. `recipient_link_id == None` means public.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Message {
    pub message_id: i32,
    pub chat_id: i32,
    pub sender_role: Role,
    // label at send time, later nickname changes don't touch it
    pub sender_name: String,
    pub content: String,
    pub recipient_link_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_public(&self) -> bool {
        self.recipient_link_id.is_none()
    }
}
