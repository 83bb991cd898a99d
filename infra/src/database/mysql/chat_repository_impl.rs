//! MySQL implementations of the ChatRepository and MessageRepository traits.
//!
//! Participants live in `chat_participants`; a message insert and the chat's
//! `last_message_at` bump share one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pz_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use pz_core::domain::entities::chat::{Chat, Message};
use pz_core::errors::StorageResult;
use pz_core::repositories::{ChatRepository, MessageRepository};

use super::rows::{column, count_column, uuid_column};
use crate::database::error_mapping::map_sqlx_error;

const MESSAGE_COLUMNS: &str = "id, chat_id, sender_id, content, sent_at, delivered_at, read_at";

pub struct MySqlChatRepository {
    pool: MySqlPool,
}

impl MySqlChatRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for MySqlChatRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Chat>> {
        let row = sqlx::query("SELECT id, last_message_at, created_at FROM chats WHERE id = ? LIMIT 1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let participant_ids: Vec<String> =
            sqlx::query_scalar("SELECT user_id FROM chat_participants WHERE chat_id = ? ORDER BY position")
                .bind(id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(Some(Chat {
            id: uuid_column(&row, "id")?,
            participant_ids,
            last_message_at: column(&row, "last_message_at")?,
            created_at: column(&row, "created_at")?,
        }))
    }

    async fn create(&self, chat: Chat) -> StorageResult<Chat> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("INSERT INTO chats (id, last_message_at, created_at) VALUES (?, ?, ?)")
            .bind(chat.id.to_string())
            .bind(chat.last_message_at)
            .bind(chat.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        for (position, user_id) in chat.participant_ids.iter().enumerate() {
            sqlx::query("INSERT INTO chat_participants (chat_id, user_id, position) VALUES (?, ?, ?)")
                .bind(chat.id.to_string())
                .bind(user_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(chat)
    }
}

pub struct MySqlMessageRepository {
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: &MySqlRow) -> StorageResult<Message> {
        Ok(Message {
            id: uuid_column(row, "id")?,
            chat_id: uuid_column(row, "chat_id")?,
            sender_id: column(row, "sender_id")?,
            content: column(row, "content")?,
            sent_at: column(row, "sent_at")?,
            delivered_at: column(row, "delivered_at")?,
            read_at: column(row, "read_at")?,
        })
    }

    /// Run a guarded timestamp update, then return the message as stored
    async fn transition(&self, update: &'static str, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>> {
        sqlx::query(update)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        self.find_by_id(id).await
    }
}

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Message>> {
        let query = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ? LIMIT 1");
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_message).transpose()
    }

    async fn create(&self, message: Message) -> StorageResult<Message> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            "INSERT INTO messages (id, chat_id, sender_id, content, sent_at, delivered_at, read_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.chat_id.to_string())
        .bind(&message.sender_id)
        .bind(&message.content)
        .bind(message.sent_at)
        .bind(message.delivered_at)
        .bind(message.read_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("UPDATE chats SET last_message_at = ? WHERE id = ?")
            .bind(message.sent_at)
            .bind(message.chat_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(message)
    }

    async fn mark_delivered(&self, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>> {
        self.transition(
            "UPDATE messages SET delivered_at = ? WHERE id = ? AND delivered_at IS NULL",
            id,
            at,
        )
        .await
    }

    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>> {
        self.transition(
            "UPDATE messages SET read_at = ?, delivered_at = COALESCE(delivered_at, read_at) \
             WHERE id = ? AND read_at IS NULL",
            id,
            at,
        )
        .await
    }

    async fn mark_all_read(&self, chat_id: Uuid, reader_id: &str, at: DateTime<Utc>) -> StorageResult<u64> {
        let query = r#"
            UPDATE messages
            SET read_at = ?, delivered_at = COALESCE(delivered_at, read_at)
            WHERE chat_id = ? AND sender_id <> ? AND read_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(chat_id.to_string())
            .bind(reader_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn list_by_chat(&self, chat_id: Uuid, pagination: &Pagination) -> StorageResult<(Vec<Message>, u64)> {
        let total_row = sqlx::query("SELECT COUNT(*) AS total FROM messages WHERE chat_id = ?")
            .bind(chat_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let total = count_column(&total_row, "total")?;

        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = ? ORDER BY sent_at DESC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query(&query)
            .bind(chat_id.to_string())
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let messages = rows.iter().map(Self::row_to_message).collect::<StorageResult<Vec<_>>>()?;
        Ok((messages, total))
    }
}
