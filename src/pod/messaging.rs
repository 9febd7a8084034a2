//! Message Store: append and filtered reads of a chat's history.

use crate::core::AppState;
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use crate::pod::{Audience, Participant, PodError};
use crate::repositories::{Create, Read};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Appends a message on behalf of `sender` and publishes it to live viewers.
///
/// Only the moderator may address a single link; everyone else posts to the
/// whole chat. The recipient (and the sender's own link) must still be
/// active when the row is written: both are checked by the same statement
/// that appends, so a racing revocation either wins entirely or loses
/// entirely.
#[instrument(skip(state, sender, content), fields(chat_id = sender.chat_id(), role = ?sender.role(), recipient = ?recipient_link_id))]
pub async fn send(
    state: &AppState,
    sender: &Participant,
    content: &str,
    recipient_link_id: Option<i32>,
) -> Result<Message, PodError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(PodError::EmptyContent);
    }

    if !sender.is_moderator() && recipient_link_id.is_some() {
        warn!("Participant tried to address a private message");
        return Err(PodError::Forbidden);
    }

    if sender.is_moderator() {
        state
            .chat
            .read(&sender.chat_id())
            .await?
            .ok_or(PodError::NotFound)?;
    }

    let data = CreateMessageDTO {
        chat_id: sender.chat_id(),
        sender_role: sender.role(),
        sender_name: sender.display_name(),
        content: content.to_string(),
        recipient_link_id,
        sender_link_id: sender.link_id(),
    };

    let message = state.msg.create(&data).await.map_err(|e| match e {
        sqlx::Error::RowNotFound if recipient_link_id.is_some() => {
            warn!("Recipient link is not active");
            PodError::UnknownRecipient
        }
        sqlx::Error::RowNotFound => {
            warn!("Sender link was revoked");
            PodError::Forbidden
        }
        other => other.into(),
    })?;

    let delivered = state.chats_online.publish(Arc::new(message.clone()));
    info!(message_id = message.message_id, delivered, "Message accepted");
    Ok(message)
}

/// History of `chat_id` as `viewer` may see it, oldest first.
#[instrument(skip(state, viewer), fields(chat_id = %chat_id))]
pub async fn list_visible(
    state: &AppState,
    chat_id: i32,
    viewer: &Participant,
) -> Result<Vec<Message>, PodError> {
    if viewer.chat_id() != chat_id {
        warn!(viewer_chat_id = viewer.chat_id(), "Viewer belongs to another chat");
        return Err(PodError::Forbidden);
    }
    if viewer.is_moderator() {
        state.chat.read(&chat_id).await?.ok_or(PodError::NotFound)?;
    }

    let messages = state
        .msg
        .find_many_visible(&chat_id, Audience::from(viewer))
        .await?;
    debug!(count = messages.len(), "History loaded");
    Ok(messages)
}
