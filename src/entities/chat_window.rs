//! ChatWindow entity - Entità "pod", una stanza di conversazione dentro un progetto

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct ChatWindow {
    pub chat_id: i32,
    pub project_id: i32,
    pub title: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// kill-switch: nobody but the moderator may join while set
    pub links_disabled: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
