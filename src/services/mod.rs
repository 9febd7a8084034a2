//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Handler sottili: estraggono i parametri, delegano a `pod` e convertono
//! il risultato in JSON.

pub mod auth;
pub mod chat;
pub mod join;
pub mod link;
pub mod project;

// Re-exports per facilitare l'import
pub use auth::login_moderator;
pub use chat::{
    delete_chat_window, get_chat_window, list_messages, send_message, set_links_disabled,
    update_chat_window,
};
pub use join::{join_by_url, join_chat};
pub use link::{create_link, list_consents, list_links, revoke_link};
pub use project::{create_chat_window, create_project, get_project, list_chat_windows};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
