//! Auth services - login del moderatore

use crate::core::auth::MODERATOR_SUBJECT;
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{ModeratorLoginDTO, TokenDTO};
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[instrument(skip(state, body))]
pub async fn login_moderator(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ModeratorLoginDTO>,
) -> Result<Json<TokenDTO>, AppError> {
    if body.password.is_empty() || body.password != state.moderator_password {
        warn!("Moderator login failed");
        return Err(AppError::unauthorized("Wrong moderator password"));
    }

    let token = encode_jwt(MODERATOR_SUBJECT, &state.jwt_secret)?;
    info!("Moderator logged in");
    Ok(Json(TokenDTO { token }))
}
