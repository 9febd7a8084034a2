//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod auth;
pub mod chat_window;
pub mod consent;
pub mod join;
pub mod link;
pub mod message;
pub mod project;
pub mod ws_event;

pub use auth::{ModeratorLoginDTO, TokenDTO};
pub use chat_window::{ChatWindowDTO, CreateChatWindowDTO, LinksDisabledDTO, UpdateChatWindowDTO};
pub use consent::{ConsentAnswersDTO, ConsentDTO, CreateConsentDTO};
pub use join::{JoinByUrlDTO, JoinDTO, ParticipantDTO};
pub use link::{CreateLinkDTO, CreateLinkRequestDTO, LinkDTO, UpdateLinkDTO};
pub use message::{CreateMessageDTO, MessageDTO, SendMessageDTO};
pub use project::{CreateProjectDTO, ProjectDTO};
pub use ws_event::WsEventDTO;
