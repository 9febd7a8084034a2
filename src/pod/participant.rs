//! Explicit identity threaded through every read and write.

use crate::entities::{Link, LinkRole, Role};

/// Who is acting in a chat.
///
/// Produced by [`crate::pod::identity::join`]; there is no ambient "current
/// user", every operation receives the participant it acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participant {
    /// Token-less, sees and may address all traffic of the chat
    Moderator { chat_id: i32 },
    /// Holder of a link token
    Link(LinkParticipant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParticipant {
    pub link_id: i32,
    pub chat_id: i32,
    pub role: LinkRole,
    pub multi: bool,
    pub nickname: String,
}

impl From<&Link> for LinkParticipant {
    fn from(link: &Link) -> Self {
        Self {
            link_id: link.link_id,
            chat_id: link.chat_id,
            role: link.role,
            multi: link.multi,
            nickname: link.nickname.clone(),
        }
    }
}

impl Participant {
    pub fn moderator(chat_id: i32) -> Self {
        Participant::Moderator { chat_id }
    }

    pub fn chat_id(&self) -> i32 {
        match self {
            Participant::Moderator { chat_id } => *chat_id,
            Participant::Link(p) => p.chat_id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Participant::Moderator { .. } => Role::Moderator,
            Participant::Link(p) => p.role.into(),
        }
    }

    pub fn link_id(&self) -> Option<i32> {
        match self {
            Participant::Moderator { .. } => None,
            Participant::Link(p) => Some(p.link_id),
        }
    }

    pub fn is_moderator(&self) -> bool {
        matches!(self, Participant::Moderator { .. })
    }

    pub fn is_multi(&self) -> bool {
        match self {
            Participant::Moderator { .. } => false,
            Participant::Link(p) => p.multi,
        }
    }

    pub fn nickname(&self) -> &str {
        match self {
            Participant::Moderator { .. } => "",
            Participant::Link(p) => &p.nickname,
        }
    }

    /// Label stamped on outgoing messages
    pub fn display_name(&self) -> String {
        match self {
            Participant::Moderator { .. } => "Moderator".to_string(),
            Participant::Link(p) if !p.nickname.trim().is_empty() => p.nickname.clone(),
            Participant::Link(p) => match p.role {
                LinkRole::Respondent => "Respondent".to_string(),
                LinkRole::Client => "Client".to_string(),
            },
        }
    }
}
