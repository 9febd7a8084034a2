use crate::core::{AppError, AppState};
use crate::pod::{Participant, identity};
use axum::extract::{Query, State};
use axum::{Error, body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const MODERATOR_SUBJECT: &str = "moderator";

/// Header carrying a participant's link token
pub const LINK_TOKEN_HEADER: &str = "x-link-token";

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub sub: String,
}

#[derive(Deserialize)]
struct LinkTokenQuery {
    l: Option<String>,
}

#[instrument(skip(secret))]
pub fn encode_jwt(subject: &str, secret: &str) -> Result<String, Error> {
    debug!("Encoding JWT token");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(24);
    let claim = Claims {
        iat: now.timestamp() as usize,
        exp: (now + expire).timestamp() as usize,
        sub: subject.to_string(),
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, Error> {
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// `Some(Ok(()))` for a valid moderator bearer, `Some(Err)` for a bad one,
/// `None` when the request carries no bearer at all.
pub(crate) fn check_moderator_bearer(
    headers: &http::HeaderMap,
    secret: &str,
) -> Option<Result<(), AppError>> {
    let header = headers.get(http::header::AUTHORIZATION)?;
    let result = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Malformed authorization header"))
        .and_then(|token| {
            decode_jwt(token.trim(), secret)
                .map_err(|_| AppError::unauthorized("Unable to decode token"))
        })
        .and_then(|data| {
            if data.claims.sub == MODERATOR_SUBJECT {
                Ok(())
            } else {
                Err(AppError::unauthorized("Token is not a moderator token"))
            }
        });
    Some(result)
}

/// Lascia passare solo richieste con un JWT da moderatore valido
#[instrument(skip(state, req, next))]
pub async fn moderator_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running moderator middleware");
    match check_moderator_bearer(req.headers(), &state.jwt_secret) {
        Some(Ok(())) => Ok(next.run(req).await),
        Some(Err(e)) => {
            warn!("Rejected moderator token");
            Err(e)
        }
        None => {
            warn!("Missing authorization header");
            Err(AppError::unauthorized("Please add the JWT token to the header"))
        }
    }
}

/// Resolves the acting [`Participant`] of a chat-scoped request.
///
/// A moderator bearer wins; otherwise the link token is read from the
/// `X-Link-Token` header or the `l` query parameter. The resolver runs on
/// every request, so a revoked link or a disabled chat is refused at once.
#[instrument(skip(state, req, next))]
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    // Estrarre chat_id dal path
    let chat_id: i32 = req
        .uri()
        .path()
        .split('/')
        .find_map(|segment| segment.parse::<i32>().ok())
        .ok_or_else(|| {
            warn!("Chat ID not found in path: {}", req.uri().path());
            AppError::bad_request("Chat ID not found in path")
        })?;

    let participant = match check_moderator_bearer(req.headers(), &state.jwt_secret) {
        Some(Ok(())) => identity::join(&state, chat_id, None, None).await?,
        Some(Err(e)) => return Err(e),
        None => {
            let token = req
                .headers()
                .get(LINK_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .or_else(|| {
                    Query::<LinkTokenQuery>::try_from_uri(req.uri())
                        .ok()
                        .and_then(|Query(q)| q.l)
                })
                .ok_or_else(|| {
                    warn!("Request without credentials");
                    AppError::unauthorized("A moderator token or a link token is required")
                })?;
            identity::join(&state, chat_id, Some(&token), None).await?
        }
    };

    info!(chat_id, link_id = ?participant.link_id(), "Participant resolved");
    req.extensions_mut().insert(participant);
    Ok(next.run(req).await)
}
