//! Visibility rule shared by history reads and live fan-out.
//!
//! A moderator sees every message of the chat. Anyone else sees public
//! messages plus those addressed to their own link; messages for other links
//! are absent, not redacted.

use crate::entities::Message;
use crate::pod::Participant;

/// Slice of a chat's history a viewer may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Everything,
    /// public messages and DMs to this link id
    PublicAnd(i32),
}

impl From<&Participant> for Audience {
    fn from(viewer: &Participant) -> Self {
        match viewer {
            Participant::Moderator { .. } => Audience::Everything,
            Participant::Link(p) => Audience::PublicAnd(p.link_id),
        }
    }
}

impl Audience {
    pub fn admits(&self, message: &Message) -> bool {
        match (self, message.recipient_link_id) {
            (Audience::Everything, _) => true,
            (Audience::PublicAnd(_), None) => true,
            (Audience::PublicAnd(link_id), Some(recipient)) => *link_id == recipient,
        }
    }
}

/// True when `viewer` may read `message`.
pub fn is_visible_to(message: &Message, viewer: &Participant) -> bool {
    message.chat_id == viewer.chat_id() && Audience::from(viewer).admits(message)
}
