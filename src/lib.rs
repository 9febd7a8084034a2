//! Chatpod library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod pod;
pub mod repositories;
pub mod services;
pub mod ws;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{any, delete, get, patch, post},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .route("/auth/moderator", post(login_moderator))
        .route("/join", post(join_by_url))
        .route("/chats/{chat_id}/join", post(join_chat))
        .merge(configure_moderator_routes(state.clone()))
        .merge(configure_participant_routes(state.clone()))
        .with_state(state)
}

/// Routes riservate al moderatore (Bearer JWT)
fn configure_moderator_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::moderator_middleware;
    use services::*;

    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/{project_id}", get(get_project))
        .route(
            "/projects/{project_id}/chats",
            get(list_chat_windows).post(create_chat_window),
        )
        .route(
            "/chats/{chat_id}",
            get(get_chat_window)
                .patch(update_chat_window)
                .delete(delete_chat_window),
        )
        .route("/chats/{chat_id}/links_disabled", patch(set_links_disabled))
        .route("/chats/{chat_id}/links", get(list_links).post(create_link))
        .route("/links/{link_id}", delete(revoke_link))
        .route("/links/{link_id}/consents", get(list_consents))
        .layer(middleware::from_fn_with_state(state, moderator_middleware))
}

/// Routes di una chat accessibili a moderatore e participant
fn configure_participant_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::identity_middleware;
    use services::*;
    use ws::ws_handler;

    Router::new()
        .route(
            "/chats/{chat_id}/messages",
            get(list_messages).post(send_message),
        )
        .route("/chats/{chat_id}/ws", any(ws_handler))
        .layer(middleware::from_fn_with_state(state, identity_middleware))
}
