//! ChatWindow DTOs - Data Transfer Objects per i pod

use crate::entities::ChatWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatWindowDTO {
    pub chat_id: i32,
    pub project_id: i32,
    pub title: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub links_disabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ChatWindow> for ChatWindowDTO {
    fn from(value: ChatWindow) -> Self {
        Self {
            chat_id: value.chat_id,
            project_id: value.project_id,
            title: value.title,
            scheduled_at: value.scheduled_at,
            links_disabled: value.links_disabled,
            created_at: value.created_at,
        }
    }
}

/// DTO per creare un nuovo pod (senza chat_id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateChatWindowDTO {
    #[serde(default)]
    pub project_id: i32,

    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// DTO per aggiornare un pod (solo campi modificabili)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateChatWindowDTO {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub links_disabled: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinksDisabledDTO {
    pub links_disabled: bool,
}
