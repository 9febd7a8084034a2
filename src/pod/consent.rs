//! Consent Ledger: append-only record of what a participant agreed to.

use crate::core::AppState;
use crate::dtos::CreateConsentDTO;
use crate::entities::Consent;
use crate::pod::PodError;
use crate::repositories::{Create, Read};
use tracing::{info, instrument};

#[instrument(skip(state, nickname), fields(link_id = %link_id))]
pub async fn record_consent(
    state: &AppState,
    link_id: i32,
    nickname: &str,
    agreed_dpa: bool,
    agreed_study: bool,
) -> Result<Consent, PodError> {
    let data = CreateConsentDTO {
        link_id,
        nickname: nickname.to_string(),
        agreed_dpa,
        agreed_study,
    };
    let consent = state.consent.create(&data).await?;
    info!(agreed_dpa, agreed_study, "Consent recorded");
    Ok(consent)
}

/// Audit view for the moderator, newest first. Revoked links keep their history.
pub async fn list_consents(state: &AppState, link_id: i32) -> Result<Vec<Consent>, PodError> {
    state.link.read(&link_id).await?.ok_or(PodError::NotFound)?;
    Ok(state.consent.find_many_by_link_id(&link_id).await?)
}
