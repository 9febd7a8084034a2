//! Link Registry: issues, revokes and resolves participation tokens.

use crate::core::AppState;
use crate::dtos::{CreateLinkDTO, UpdateLinkDTO};
use crate::entities::{Link, LinkRole};
use crate::pod::PodError;
use crate::repositories::{Create, Delete, Read, Update};
use lazy_static::lazy_static;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

/// Length of generated tokens (~142 bits of entropy).
pub const TOKEN_LENGTH: usize = 24;

/// Collisions are astronomically unlikely; a few re-rolls are plenty.
const MAX_TOKEN_ATTEMPTS: usize = 5;

lazy_static! {
    static ref TOKEN_FORMAT: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap();
}

pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Issues a new link for `chat_id` with a fresh random token.
pub async fn create_link(
    state: &AppState,
    chat_id: i32,
    role: LinkRole,
    internal_name: &str,
    multi: bool,
) -> Result<Link, PodError> {
    create_link_with(state, chat_id, role, internal_name, multi, generate_token).await
}

/// Like [`create_link`] but draws tokens from `next_token`.
///
/// A token that collides with an active link is re-rolled instead of being
/// stored twice.
#[instrument(skip(state, next_token), fields(chat_id = %chat_id, role = %role))]
pub async fn create_link_with<F>(
    state: &AppState,
    chat_id: i32,
    role: LinkRole,
    internal_name: &str,
    multi: bool,
    mut next_token: F,
) -> Result<Link, PodError>
where
    F: FnMut() -> String,
{
    debug!("Creating link");
    state.chat.read(&chat_id).await?.ok_or_else(|| {
        warn!("Chat window not found");
        PodError::NotFound
    })?;

    for attempt in 1..=MAX_TOKEN_ATTEMPTS {
        let data = CreateLinkDTO {
            chat_id,
            role,
            internal_name: internal_name.trim().to_string(),
            token: next_token(),
            multi,
        };
        match state.link.create(&data).await {
            Ok(link) => {
                info!(link_id = link.link_id, "Link issued");
                return Ok(link);
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!(attempt, "Token collision, re-rolling");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(PodError::Unavailable(
        "could not allocate a unique token".to_string(),
    ))
}

/// Soft-deletes the link and cuts off its live viewers. Revoking twice is a
/// no-op success.
#[instrument(skip(state), fields(link_id = %link_id))]
pub async fn revoke_link(state: &AppState, link_id: i32) -> Result<(), PodError> {
    let link = state.link.read(&link_id).await?.ok_or_else(|| {
        warn!("Revoke requested for unknown link");
        PodError::NotFound
    })?;
    state.link.delete(&link_id).await?;

    let cut_off = state.chats_online.revoke_link(link.chat_id, link_id);
    info!(cut_off, "Link revoked");
    Ok(())
}

/// Active link holding `token`.
///
/// Unknown, revoked and malformed tokens are indistinguishable: all of them
/// fail with [`PodError::NotFound`].
#[instrument(skip_all)]
pub async fn resolve_by_token(state: &AppState, token: &str) -> Result<Link, PodError> {
    if !TOKEN_FORMAT.is_match(token) {
        debug!("Malformed token rejected");
        return Err(PodError::NotFound);
    }
    state
        .link
        .find_active_by_token(token)
        .await?
        .ok_or(PodError::NotFound)
}

/// Overwrites the nickname of an active link.
#[instrument(skip(state, nickname), fields(link_id = %link_id))]
pub async fn set_nickname(state: &AppState, link_id: i32, nickname: &str) -> Result<Link, PodError> {
    let data = UpdateLinkDTO {
        nickname: nickname.trim().to_string(),
    };
    let link = state.link.update(&link_id, &data).await?;
    info!("Nickname set");
    Ok(link)
}

/// Active links of a chat, oldest first.
pub async fn list_links(state: &AppState, chat_id: i32) -> Result<Vec<Link>, PodError> {
    state.chat.read(&chat_id).await?.ok_or(PodError::NotFound)?;
    Ok(state.link.find_many_active_by_chat_id(&chat_id).await?)
}
