//! Project entity - Entità progetto

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Feature toggles and consent copy shown on the join page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub allow_emoji: bool,
    pub allow_gifs: bool,
    pub allow_attachments: bool,
    pub store_meta: bool,
    pub show_dpa: bool,
    pub show_consent: bool,
    pub dpa_text: String,
    pub consent_text: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            allow_emoji: true,
            allow_gifs: true,
            allow_attachments: true,
            store_meta: false,
            show_dpa: true,
            show_consent: true,
            dpa_text: "I agree to the processing of my personal data.".to_string(),
            consent_text: "I agree to take part in the study.".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Project {
    pub project_id: i32,
    pub name: String,
    pub settings: Json<ProjectSettings>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
