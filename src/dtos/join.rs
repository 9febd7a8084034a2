//! Join DTOs - ingresso in un pod tramite token

use crate::dtos::ConsentAnswersDTO;
use crate::entities::{LinkRole, Role};
use crate::pod::Participant;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body di POST /chats/{chat_id}/join
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct JoinDTO {
    /// Link token; absent for the moderator
    #[serde(default)]
    pub token: Option<String>,

    /// Role claimed by the join URL
    #[serde(default)]
    pub role: Option<LinkRole>,

    #[validate(length(max = 64, message = "Nickname must be at most 64 characters"))]
    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub consent: Option<ConsentAnswersDTO>,
}

/// Body di POST /join: the invitation URL as handed out, instead of its parts
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct JoinByUrlDTO {
    #[validate(length(min = 1, max = 2048, message = "Join URL must be between 1 and 2048 characters"))]
    pub url: String,

    #[validate(length(max = 64, message = "Nickname must be at most 64 characters"))]
    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub consent: Option<ConsentAnswersDTO>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParticipantDTO {
    pub chat_id: i32,
    pub role: Role,
    pub link_id: Option<i32>,
    pub multi: bool,
    pub nickname: String,
}

impl From<&Participant> for ParticipantDTO {
    fn from(value: &Participant) -> Self {
        Self {
            chat_id: value.chat_id(),
            role: value.role(),
            link_id: value.link_id(),
            multi: value.is_multi(),
            nickname: value.nickname().to_string(),
        }
    }
}
