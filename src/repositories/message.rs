//! MessageRepository - Repository per la gestione dei messaggi
//!
//! Messages are append-only: there is no `Update`/`Delete` implementation and
//! the schema rejects both with triggers.

use super::{Create, Read};
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use crate::pod::Audience;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const MESSAGE_COLUMNS: &str =
    "message_id, chat_id, sender_role, sender_name, content, recipient_link_id, created_at";

pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Messages of a chat the given audience may read, oldest first.
    ///
    /// Ties on `created_at` are broken by `message_id`, so the sequence is a
    /// stable prefix-preserving log that can be re-fetched after a reconnect.
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn find_many_visible(
        &self,
        chat_id: &i32,
        audience: Audience,
    ) -> Result<Vec<Message>, Error> {
        let messages = match audience {
            Audience::Everything => {
                sqlx::query_as::<_, Message>(&format!(
                    "SELECT {MESSAGE_COLUMNS} FROM messages \
                     WHERE chat_id = ? \
                     ORDER BY created_at ASC, message_id ASC"
                ))
                .bind(chat_id)
                .fetch_all(&self.connection_pool)
                .await?
            }
            Audience::PublicAnd(link_id) => {
                sqlx::query_as::<_, Message>(&format!(
                    "SELECT {MESSAGE_COLUMNS} FROM messages \
                     WHERE chat_id = ? AND (recipient_link_id IS NULL OR recipient_link_id = ?) \
                     ORDER BY created_at ASC, message_id ASC"
                ))
                .bind(chat_id)
                .bind(link_id)
                .fetch_all(&self.connection_pool)
                .await?
            }
        };

        debug!("Loaded {} visible messages", messages.len());
        Ok(messages)
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    /// Appends a message in a single statement.
    ///
    /// The row is only inserted while the recipient link (if any) and the
    /// sender link (if any) are still active in the same chat; otherwise no
    /// row is produced and the call fails with `RowNotFound`. Because SQLite
    /// holds the write lock for the whole statement, a concurrent revocation
    /// either commits before (the send fails) or after (the message stands).
    ///
    /// `created_at` never goes backwards inside a chat, so timestamp order
    /// and id order always agree.
    #[instrument(skip(self, data), fields(chat_id = %data.chat_id, sender_role = ?data.sender_role))]
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        debug!("Appending message");
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (chat_id, sender_role, sender_name, content, recipient_link_id, created_at)
            SELECT ?1, ?2, ?3, ?4, ?5,
                   MAX(strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
                       COALESCE((SELECT MAX(created_at) FROM messages WHERE chat_id = ?1), ''))
            WHERE (?5 IS NULL OR EXISTS (
                      SELECT 1 FROM links
                      WHERE link_id = ?5 AND chat_id = ?1 AND deleted_at IS NULL))
              AND (?6 IS NULL OR EXISTS (
                      SELECT 1 FROM links
                      WHERE link_id = ?6 AND chat_id = ?1 AND deleted_at IS NULL))
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(data.chat_id)
        .bind(data.sender_role)
        .bind(&data.sender_name)
        .bind(&data.content)
        .bind(data.recipient_link_id)
        .bind(data.sender_link_id)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Message {} stored", message.message_id);
        Ok(message)
    }
}

impl Read<Message, i32> for MessageRepository {
    #[instrument(skip(self), fields(message_id = %id))]
    async fn read(&self, id: &i32) -> Result<Option<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE message_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
