//! Join service - ingresso in un pod

use crate::core::auth::check_moderator_bearer;
use crate::core::{AppError, AppState};
use crate::dtos::{JoinByUrlDTO, JoinDTO, ParticipantDTO};
use crate::pod::{JoinUrl, identity};
use axum::{
    extract::{Json, Path, State},
    http::HeaderMap,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Enters a chat with a link token, or as moderator when no token is given.
///
/// The token-less form requires the moderator bearer.
#[instrument(skip(state, headers, body), fields(chat_id = %chat_id))]
pub async fn join_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    headers: HeaderMap,
    Json(body): Json<JoinDTO>,
) -> Result<Json<ParticipantDTO>, AppError> {
    body.validate()?;

    if body.token.is_none() {
        debug!("Token-less join, checking moderator credentials");
        match check_moderator_bearer(&headers, &state.jwt_secret) {
            Some(Ok(())) => {}
            Some(Err(e)) => return Err(e),
            None => {
                warn!("Token-less join without moderator credentials");
                return Err(AppError::unauthorized("A link token is required to join"));
            }
        }
    }

    let participant = identity::enter(
        &state,
        chat_id,
        body.token.as_deref(),
        body.role,
        body.nickname.as_deref(),
        body.consent,
    )
    .await?;

    Ok(Json(ParticipantDTO::from(&participant)))
}

/// Enters a chat from a pasted join URL.
#[instrument(skip(state, body))]
pub async fn join_by_url(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JoinByUrlDTO>,
) -> Result<Json<ParticipantDTO>, AppError> {
    body.validate()?;
    let url = JoinUrl::parse(&body.url).ok_or_else(|| {
        warn!("Malformed join URL");
        AppError::bad_request("Malformed join URL")
    })?;

    let participant = identity::enter(
        &state,
        url.chat_id,
        Some(&url.token),
        Some(url.role),
        body.nickname.as_deref(),
        body.consent,
    )
    .await?;

    Ok(Json(ParticipantDTO::from(&participant)))
}
