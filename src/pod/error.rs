//! Error taxonomy of the participation engine.

use thiserror::Error;

/// Failures of join, send and registry operations.
///
/// Everything except [`PodError::Unavailable`] is terminal for the attempt:
/// it reflects an authorization or referential-integrity violation, never
/// infrastructure flakiness, so callers must not retry it blindly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PodError {
    #[error("joining this chat is disabled")]
    JoinDisabled,

    #[error("link not found or revoked")]
    InvalidLink,

    #[error("link belongs to another chat")]
    LinkChatMismatch,

    #[error("link was issued for a different role")]
    RoleMismatch,

    #[error("operation not allowed for this participant")]
    Forbidden,

    #[error("recipient link is not active in this chat")]
    UnknownRecipient,

    #[error("not found")]
    NotFound,

    #[error("message content is empty")]
    EmptyContent,

    #[error("nickname is required")]
    MissingNickname,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for PodError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PodError::NotFound,
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => PodError::NotFound,
            other => PodError::Unavailable(other.to_string()),
        }
    }
}
