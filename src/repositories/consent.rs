//! ConsentRepository - registro append-only dei consensi

use super::Create;
use crate::dtos::CreateConsentDTO;
use crate::entities::Consent;
use sqlx::{Error, SqlitePool};
use tracing::{info, instrument};

const CONSENT_COLUMNS: &str = "consent_id, link_id, nickname, agreed_dpa, agreed_study, created_at";

pub struct ConsentRepository {
    connection_pool: SqlitePool,
}

impl ConsentRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// All consents recorded for a link, newest first
    #[instrument(skip(self), fields(link_id = %link_id))]
    pub async fn find_many_by_link_id(&self, link_id: &i32) -> Result<Vec<Consent>, Error> {
        sqlx::query_as::<_, Consent>(&format!(
            "SELECT {CONSENT_COLUMNS} FROM consents \
             WHERE link_id = ? \
             ORDER BY created_at DESC, consent_id DESC"
        ))
        .bind(link_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<Consent, CreateConsentDTO> for ConsentRepository {
    #[instrument(skip(self, data), fields(link_id = %data.link_id))]
    async fn create(&self, data: &CreateConsentDTO) -> Result<Consent, Error> {
        let consent = sqlx::query_as::<_, Consent>(&format!(
            "INSERT INTO consents (link_id, nickname, agreed_dpa, agreed_study) \
             VALUES (?, ?, ?, ?) \
             RETURNING {CONSENT_COLUMNS}"
        ))
        .bind(data.link_id)
        .bind(&data.nickname)
        .bind(data.agreed_dpa)
        .bind(data.agreed_study)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Consent {} recorded", consent.consent_id);
        Ok(consent)
    }
}
