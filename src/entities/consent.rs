//! Consent entity - append-only, mai modificata o cancellata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Consent {
    pub consent_id: i32,
    pub link_id: i32,
    pub nickname: String,
    pub agreed_dpa: bool,
    pub agreed_study: bool,
    pub created_at: DateTime<Utc>,
}
