//! Identity Resolver: turns a join attempt into a [`Participant`].

use crate::core::AppState;
use crate::dtos::ConsentAnswersDTO;
use crate::entities::LinkRole;
use crate::pod::{LinkParticipant, Participant, PodError, consent, registry};
use crate::repositories::Read;
use tracing::{debug, info, instrument, warn};

/// Resolves `(chat_id, token, claimed_role)` without side effects.
///
/// No token means the moderator; the caller is responsible for having
/// authenticated the moderator before getting here. Checks run in order:
/// join kill-switch, token lookup, chat match, role match.
#[instrument(skip(state, token), fields(chat_id = %chat_id, has_token = token.is_some()))]
pub async fn join(
    state: &AppState,
    chat_id: i32,
    token: Option<&str>,
    claimed_role: Option<LinkRole>,
) -> Result<Participant, PodError> {
    let chat = state.chat.read(&chat_id).await?;

    let Some(token) = token else {
        debug!("Token-less access, resolving as moderator");
        return chat
            .map(|c| Participant::moderator(c.chat_id))
            .ok_or(PodError::NotFound);
    };

    // an unknown chat in the URL must not reveal anything about the token
    let chat = chat.ok_or_else(|| {
        warn!("Join attempt for unknown chat");
        PodError::InvalidLink
    })?;

    if chat.links_disabled {
        warn!("Join attempt while links are disabled");
        return Err(PodError::JoinDisabled);
    }

    let link = registry::resolve_by_token(state, token)
        .await
        .map_err(|e| match e {
            PodError::NotFound => {
                warn!("Join attempt with invalid token");
                PodError::InvalidLink
            }
            other => other,
        })?;

    if link.chat_id != chat_id {
        warn!(link_chat_id = link.chat_id, "Token replayed into another chat");
        return Err(PodError::LinkChatMismatch);
    }

    if let Some(claimed) = claimed_role {
        if claimed != link.role {
            warn!(claimed = %claimed, actual = %link.role, "Claimed role does not match link");
            return Err(PodError::RoleMismatch);
        }
    }

    debug!(link_id = link.link_id, "Link resolved");
    Ok(Participant::Link(LinkParticipant::from(&link)))
}

/// Reloads an already resolved participant from the store.
///
/// Fails like a join would when the link was revoked or links were disabled
/// since; otherwise the current nickname is picked up. The moderator is
/// returned as is.
#[instrument(skip_all, fields(chat_id = participant.chat_id(), link_id = ?participant.link_id()))]
pub async fn refresh(state: &AppState, participant: &Participant) -> Result<Participant, PodError> {
    let Participant::Link(current) = participant else {
        return Ok(participant.clone());
    };

    let chat = state
        .chat
        .read(&current.chat_id)
        .await?
        .ok_or(PodError::InvalidLink)?;
    if chat.links_disabled {
        warn!("Links disabled since the participant joined");
        return Err(PodError::JoinDisabled);
    }

    let link = state
        .link
        .read(&current.link_id)
        .await?
        .filter(|link| link.is_active())
        .ok_or_else(|| {
            warn!("Link revoked since the participant joined");
            PodError::InvalidLink
        })?;

    Ok(Participant::Link(LinkParticipant::from(&link)))
}

/// Full join flow: resolution, nickname capture, optional consent.
///
/// Single-identity links must provide a nickname, which overwrites any
/// previous one; shared links keep theirs. When `consent` is given it is
/// appended to the ledger with the nickname in force at this moment.
#[instrument(skip(state, token, nickname, consent_answers), fields(chat_id = %chat_id))]
pub async fn enter(
    state: &AppState,
    chat_id: i32,
    token: Option<&str>,
    claimed_role: Option<LinkRole>,
    nickname: Option<&str>,
    consent_answers: Option<ConsentAnswersDTO>,
) -> Result<Participant, PodError> {
    let participant = join(state, chat_id, token, claimed_role).await?;

    let Participant::Link(mut link) = participant else {
        return Ok(participant);
    };

    if !link.multi {
        let nickname = nickname.map(str::trim).filter(|n| !n.is_empty()).ok_or_else(|| {
            warn!("Single-use link entered without nickname");
            PodError::MissingNickname
        })?;
        // revoked in the meantime: same answer as a bad token
        let updated = registry::set_nickname(state, link.link_id, nickname)
            .await
            .map_err(|e| match e {
                PodError::NotFound => PodError::InvalidLink,
                other => other,
            })?;
        link.nickname = updated.nickname;
    }

    if let Some(answers) = consent_answers {
        consent::record_consent(
            state,
            link.link_id,
            &link.nickname,
            answers.agreed_dpa,
            answers.agreed_study,
        )
        .await?;
    }

    info!(link_id = link.link_id, role = %link.role, "Participant entered");
    Ok(Participant::Link(link))
}
