//! Link entity - capability che concede un ruolo in una chat specifica

use super::enums::LinkRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub link_id: i32,
    pub chat_id: i32,
    pub role: LinkRole,
    /// Label visible to the moderator only
    pub internal_name: String,
    /// Chosen by the participant when entering
    pub nickname: String,
    /// Authorization secret, never the database id
    pub token: String,
    /// `true` when many concurrent visitors share this link
    pub multi: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
