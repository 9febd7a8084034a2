//! ChatWindowRepository - Repository per la gestione dei pod

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateChatWindowDTO, UpdateChatWindowDTO};
use crate::entities::ChatWindow;
use sqlx::{Error, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};

const CHAT_WINDOW_COLUMNS: &str =
    "chat_id, project_id, title, scheduled_at, links_disabled, created_at, deleted_at";

pub struct ChatWindowRepository {
    connection_pool: SqlitePool,
}

impl ChatWindowRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Get all active pods of a project, oldest first
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn find_many_by_project_id(&self, project_id: &i32) -> Result<Vec<ChatWindow>, Error> {
        sqlx::query_as::<_, ChatWindow>(&format!(
            "SELECT {CHAT_WINDOW_COLUMNS} FROM chat_windows \
             WHERE project_id = ? AND deleted_at IS NULL \
             ORDER BY created_at ASC, chat_id ASC"
        ))
        .bind(project_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<ChatWindow, CreateChatWindowDTO> for ChatWindowRepository {
    #[instrument(skip(self, data), fields(project_id = %data.project_id))]
    async fn create(&self, data: &CreateChatWindowDTO) -> Result<ChatWindow, Error> {
        debug!("Creating new chat window");
        let chat = sqlx::query_as::<_, ChatWindow>(&format!(
            "INSERT INTO chat_windows (project_id, title, scheduled_at) \
             VALUES (?, ?, ?) \
             RETURNING {CHAT_WINDOW_COLUMNS}"
        ))
        .bind(data.project_id)
        .bind(&data.title)
        .bind(data.scheduled_at)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Chat window created with id {}", chat.chat_id);
        Ok(chat)
    }
}

impl Read<ChatWindow, i32> for ChatWindowRepository {
    #[instrument(skip(self), fields(chat_id = %id))]
    async fn read(&self, id: &i32) -> Result<Option<ChatWindow>, Error> {
        debug!("Reading chat window by id");
        sqlx::query_as::<_, ChatWindow>(&format!(
            "SELECT {CHAT_WINDOW_COLUMNS} FROM chat_windows \
             WHERE chat_id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<ChatWindow, UpdateChatWindowDTO, i32> for ChatWindowRepository {
    #[instrument(skip(self, data), fields(chat_id = %id))]
    async fn update(&self, id: &i32, data: &UpdateChatWindowDTO) -> Result<ChatWindow, Error> {
        debug!("Updating chat window");
        let current = self.read(id).await?.ok_or(Error::RowNotFound)?;

        if data.title.is_none() && data.scheduled_at.is_none() && data.links_disabled.is_none() {
            debug!("No fields to update, returning current chat window");
            return Ok(current);
        }

        // Build dynamic UPDATE query using QueryBuilder
        let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new("UPDATE chat_windows SET ");
        let mut separated = query_builder.separated(", ");
        if let Some(ref title) = data.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(scheduled_at) = data.scheduled_at {
            separated.push("scheduled_at = ");
            separated.push_bind_unseparated(scheduled_at);
        }
        if let Some(links_disabled) = data.links_disabled {
            separated.push("links_disabled = ");
            separated.push_bind_unseparated(links_disabled);
        }
        query_builder.push(" WHERE chat_id = ");
        query_builder.push_bind(id);
        query_builder.push(" AND deleted_at IS NULL");

        let result = query_builder.build().execute(&self.connection_pool).await?;
        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        info!("Chat window updated successfully");
        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i32> for ChatWindowRepository {
    #[instrument(skip(self), fields(chat_id = %id))]
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE chat_windows \
             SET deleted_at = COALESCE(deleted_at, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')) \
             WHERE chat_id = ?",
        )
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        info!("Chat window soft-deleted");
        Ok(())
    }
}
