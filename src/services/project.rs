//! Project services - progetti e creazione delle chat window

use crate::core::{AppError, AppState};
use crate::dtos::{ChatWindowDTO, CreateChatWindowDTO, CreateProjectDTO, ProjectDTO};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body))]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProjectDTO>,
) -> Result<(StatusCode, Json<ProjectDTO>), AppError> {
    body.validate()?;
    let project = state.project.create(&body).await?;
    info!(project_id = project.project_id, "Project created");
    Ok((StatusCode::CREATED, Json(ProjectDTO::from(project))))
}

#[instrument(skip(state), fields(project_id = %project_id))]
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i32>,
) -> Result<Json<ProjectDTO>, AppError> {
    let project = state
        .project
        .read(&project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;
    Ok(Json(ProjectDTO::from(project)))
}

#[instrument(skip(state, body), fields(project_id = %project_id))]
pub async fn create_chat_window(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i32>,
    Json(mut body): Json<CreateChatWindowDTO>,
) -> Result<(StatusCode, Json<ChatWindowDTO>), AppError> {
    debug!("Creating chat window");
    body.project_id = project_id;
    body.validate()?;

    if state.project.read(&project_id).await?.is_none() {
        warn!("Project not found");
        return Err(AppError::not_found("Project not found"));
    }

    let chat = state.chat.create(&body).await?;
    info!(chat_id = chat.chat_id, "Chat window created");
    Ok((StatusCode::CREATED, Json(ChatWindowDTO::from(chat))))
}

#[instrument(skip(state), fields(project_id = %project_id))]
pub async fn list_chat_windows(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<ChatWindowDTO>>, AppError> {
    state
        .project
        .read(&project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;
    let chats = state.chat.find_many_by_project_id(&project_id).await?;
    Ok(Json(chats.into_iter().map(ChatWindowDTO::from).collect()))
}
