//! Consent DTOs

use crate::entities::Consent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConsentDTO {
    pub consent_id: i32,
    pub link_id: i32,
    pub nickname: String,
    pub agreed_dpa: bool,
    pub agreed_study: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Consent> for ConsentDTO {
    fn from(value: Consent) -> Self {
        Self {
            consent_id: value.consent_id,
            link_id: value.link_id,
            nickname: value.nickname,
            agreed_dpa: value.agreed_dpa,
            agreed_study: value.agreed_study,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateConsentDTO {
    pub link_id: i32,
    pub nickname: String,
    pub agreed_dpa: bool,
    pub agreed_study: bool,
}

/// Checkbox state submitted with the join form
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct ConsentAnswersDTO {
    #[serde(default)]
    pub agreed_dpa: bool,
    #[serde(default)]
    pub agreed_study: bool,
}
