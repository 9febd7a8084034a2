//! Link DTOs - Data Transfer Objects per i link di partecipazione

use crate::entities::{Link, LinkRole};
use crate::pod::JoinUrl;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Vista del moderatore su un link, con l'URL d'invito già pronto
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinkDTO {
    pub link_id: i32,
    pub chat_id: i32,
    pub role: LinkRole,
    pub internal_name: String,
    pub nickname: String,
    pub multi: bool,
    pub token: String,
    pub join_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkDTO {
    pub fn from_link(link: Link, public_base_url: &str) -> Self {
        let join_url = JoinUrl::new(link.chat_id, link.role, link.token.clone()).render(public_base_url);
        Self {
            link_id: link.link_id,
            chat_id: link.chat_id,
            role: link.role,
            internal_name: link.internal_name,
            nickname: link.nickname,
            multi: link.multi,
            token: link.token,
            join_url,
            created_at: link.created_at,
        }
    }
}

/// DTO per creare un nuovo link (senza link_id), token già generato dal registry
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateLinkDTO {
    pub chat_id: i32,
    pub role: LinkRole,
    pub internal_name: String,
    pub token: String,
    pub multi: bool,
}

/// Body della richiesta del moderatore
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateLinkRequestDTO {
    pub role: LinkRole,

    #[validate(length(max = 100, message = "Internal name must be at most 100 characters"))]
    #[serde(default)]
    pub internal_name: String,

    /// defaults to the role's usual sharing mode
    #[serde(default)]
    pub multi: Option<bool>,
}

/// DTO per aggiornare un link (solo il nickname è modificabile)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateLinkDTO {
    pub nickname: String,
}
