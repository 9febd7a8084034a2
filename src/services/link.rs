//! Link services - gestione dei link da parte del moderatore

use crate::core::{AppError, AppState};
use crate::dtos::{ConsentDTO, CreateLinkRequestDTO, LinkDTO};
use crate::pod::{consent, registry};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{instrument, info};
use validator::Validate;

#[instrument(skip(state), fields(chat_id = %chat_id))]
pub async fn list_links(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
) -> Result<Json<Vec<LinkDTO>>, AppError> {
    let links = registry::list_links(&state, chat_id).await?;
    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkDTO::from_link(link, &state.public_base_url))
            .collect(),
    ))
}

#[instrument(skip(state, body), fields(chat_id = %chat_id, role = %body.role))]
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    Json(body): Json<CreateLinkRequestDTO>,
) -> Result<(StatusCode, Json<LinkDTO>), AppError> {
    body.validate()?;
    let multi = body.multi.unwrap_or_else(|| body.role.default_multi());
    let link = registry::create_link(&state, chat_id, body.role, &body.internal_name, multi).await?;
    info!(link_id = link.link_id, "Link created");
    Ok((
        StatusCode::CREATED,
        Json(LinkDTO::from_link(link, &state.public_base_url)),
    ))
}

#[instrument(skip(state), fields(link_id = %link_id))]
pub async fn revoke_link(
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    registry::revoke_link(&state, link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), fields(link_id = %link_id))]
pub async fn list_consents(
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<i32>,
) -> Result<Json<Vec<ConsentDTO>>, AppError> {
    let consents = consent::list_consents(&state, link_id).await?;
    Ok(Json(consents.into_iter().map(ConsentDTO::from).collect()))
}
