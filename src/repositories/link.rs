//! LinkRepository - Repository per i link di partecipazione

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateLinkDTO, UpdateLinkDTO};
use crate::entities::Link;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const LINK_COLUMNS: &str =
    "link_id, chat_id, role, internal_name, nickname, token, multi, created_at, deleted_at";

pub struct LinkRepository {
    connection_pool: SqlitePool,
}

impl LinkRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Resolve an active link by its token. Revoked and unknown tokens both yield `None`.
    #[instrument(skip(self, token))]
    pub async fn find_active_by_token(&self, token: &str) -> Result<Option<Link>, Error> {
        debug!("Resolving link by token");
        sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE token = ? AND deleted_at IS NULL"
        ))
        .bind(token)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Get all active links of a chat, oldest first
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn find_many_active_by_chat_id(&self, chat_id: &i32) -> Result<Vec<Link>, Error> {
        sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE chat_id = ? AND deleted_at IS NULL \
             ORDER BY created_at ASC, link_id ASC"
        ))
        .bind(chat_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<Link, CreateLinkDTO> for LinkRepository {
    /// Fails with a unique violation when the token collides with an active link
    #[instrument(skip(self, data), fields(chat_id = %data.chat_id, role = %data.role))]
    async fn create(&self, data: &CreateLinkDTO) -> Result<Link, Error> {
        debug!("Creating new link");
        let link = sqlx::query_as::<_, Link>(&format!(
            "INSERT INTO links (chat_id, role, internal_name, nickname, token, multi) \
             VALUES (?, ?, ?, '', ?, ?) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(data.chat_id)
        .bind(data.role)
        .bind(&data.internal_name)
        .bind(&data.token)
        .bind(data.multi)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Link created with id {}", link.link_id);
        Ok(link)
    }
}

impl Read<Link, i32> for LinkRepository {
    /// Unlike the other repositories this also returns revoked links,
    /// callers check [`Link::is_active`].
    #[instrument(skip(self), fields(link_id = %id))]
    async fn read(&self, id: &i32) -> Result<Option<Link>, Error> {
        sqlx::query_as::<_, Link>(&format!("SELECT {LINK_COLUMNS} FROM links WHERE link_id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Link, UpdateLinkDTO, i32> for LinkRepository {
    /// Overwrites the nickname of an active link
    #[instrument(skip(self, data), fields(link_id = %id))]
    async fn update(&self, id: &i32, data: &UpdateLinkDTO) -> Result<Link, Error> {
        debug!("Updating link nickname");
        let link = sqlx::query_as::<_, Link>(&format!(
            "UPDATE links SET nickname = ? \
             WHERE link_id = ? AND deleted_at IS NULL \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&data.nickname)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)?;

        info!("Link nickname updated");
        Ok(link)
    }
}

impl Delete<i32> for LinkRepository {
    /// Revokes the link; the first revocation timestamp is kept
    #[instrument(skip(self), fields(link_id = %id))]
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE links \
             SET deleted_at = COALESCE(deleted_at, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')) \
             WHERE link_id = ?",
        )
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        info!("Link revoked");
        Ok(())
    }
}
