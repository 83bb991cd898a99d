//! Chat and message persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pz_shared::types::Pagination;
use uuid::Uuid;

use crate::domain::entities::chat::{Chat, Message};
use crate::errors::StorageResult;

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Chat>>;

    async fn create(&self, chat: Chat) -> StorageResult<Chat>;
}

/// Delivery and read updates are conditional so concurrent callers never
/// move a timestamp backwards or overwrite an earlier one.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Message>>;

    /// Insert the message and bump the chat's `last_message_at` in one transaction
    async fn create(&self, message: Message) -> StorageResult<Message>;

    /// Set `delivered_at` if still null; returns the row after the update
    async fn mark_delivered(&self, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>>;

    /// Set `read_at` if still null, backfilling a null `delivered_at`
    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>>;

    /// Mark every unread message in the chat not sent by `reader_id`; returns the affected count
    async fn mark_all_read(&self, chat_id: Uuid, reader_id: &str, at: DateTime<Utc>) -> StorageResult<u64>;

    /// Newest first, with the total count
    async fn list_by_chat(&self, chat_id: Uuid, pagination: &Pagination) -> StorageResult<(Vec<Message>, u64)>;
}
