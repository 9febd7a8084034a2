//! Chat services - chat window e messaggi

use crate::core::{AppError, AppState};
use crate::dtos::{ChatWindowDTO, LinksDisabledDTO, MessageDTO, SendMessageDTO, UpdateChatWindowDTO};
use crate::pod::{Participant, messaging};
use crate::repositories::{Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[instrument(skip(state), fields(chat_id = %chat_id))]
pub async fn get_chat_window(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
) -> Result<Json<ChatWindowDTO>, AppError> {
    let chat = state
        .chat
        .read(&chat_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chat not found"))?;
    Ok(Json(ChatWindowDTO::from(chat)))
}

#[instrument(skip(state, body), fields(chat_id = %chat_id))]
pub async fn update_chat_window(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    Json(body): Json<UpdateChatWindowDTO>,
) -> Result<Json<ChatWindowDTO>, AppError> {
    body.validate()?;
    let chat = state.chat.update(&chat_id, &body).await?;
    if chat.links_disabled {
        state.chats_online.disable_links(chat_id);
    }
    info!("Chat window updated");
    Ok(Json(ChatWindowDTO::from(chat)))
}

/// Kill-switch: with `links_disabled` only the moderator can get in
#[instrument(skip(state, body), fields(chat_id = %chat_id, links_disabled = body.links_disabled))]
pub async fn set_links_disabled(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    Json(body): Json<LinksDisabledDTO>,
) -> Result<Json<ChatWindowDTO>, AppError> {
    let update = UpdateChatWindowDTO {
        links_disabled: Some(body.links_disabled),
        ..Default::default()
    };
    let chat = state.chat.update(&chat_id, &update).await?;
    if chat.links_disabled {
        state.chats_online.disable_links(chat_id);
    }
    info!("Links kill-switch updated");
    Ok(Json(ChatWindowDTO::from(chat)))
}

#[instrument(skip(state), fields(chat_id = %chat_id))]
pub async fn delete_chat_window(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.chat.delete(&chat_id).await?;
    state.chats_online.close(chat_id);
    info!("Chat window deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, participant), fields(chat_id = %chat_id))]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    Extension(participant): Extension<Participant>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    let messages = messaging::list_visible(&state, chat_id, &participant).await?;
    Ok(Json(messages.into_iter().map(MessageDTO::from).collect()))
}

#[instrument(skip(state, participant, body), fields(chat_id = %chat_id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i32>,
    Extension(participant): Extension<Participant>,
    Json(body): Json<SendMessageDTO>,
) -> Result<(StatusCode, Json<MessageDTO>), AppError> {
    body.validate()?;
    if participant.chat_id() != chat_id {
        return Err(AppError::forbidden("Link does not belong to this chat"));
    }
    let message = messaging::send(&state, &participant, &body.content, body.recipient_link_id).await?;
    Ok((StatusCode::CREATED, Json(MessageDTO::from(message))))
}
