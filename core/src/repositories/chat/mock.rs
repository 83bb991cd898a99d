//! In-memory chat and message repositories for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pz_shared::types::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::chat::{Chat, Message};
use crate::errors::{StorageError, StorageResult};

use super::trait_::{ChatRepository, MessageRepository};

#[derive(Default)]
pub struct MockChatRepository {
    chats: Arc<RwLock<HashMap<Uuid, Chat>>>,
}

impl MockChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn touch(&self, chat_id: Uuid, at: DateTime<Utc>) -> StorageResult<()> {
        let mut chats = self.chats.write().await;
        let chat = chats
            .get_mut(&chat_id)
            .ok_or_else(|| StorageError::foreign_key_violation("chat_id").with_constraint("fk_messages_chat"))?;
        chat.last_message_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl ChatRepository for MockChatRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Chat>> {
        Ok(self.chats.read().await.get(&id).cloned())
    }

    async fn create(&self, chat: Chat) -> StorageResult<Chat> {
        self.chats.write().await.insert(chat.id, chat.clone());
        Ok(chat)
    }
}

/// Messages bump their chat through the shared chat store
pub struct MockMessageRepository {
    messages: Arc<RwLock<HashMap<Uuid, Message>>>,
    chats: Arc<MockChatRepository>,
}

impl MockMessageRepository {
    pub fn new(chats: Arc<MockChatRepository>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(HashMap::new())),
            chats,
        }
    }

    /// Insert a message as-is, without touching the chat
    pub async fn seed(&self, message: Message) {
        self.messages.write().await.insert(message.id, message);
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Message>> {
        Ok(self.messages.read().await.get(&id).cloned())
    }

    async fn create(&self, message: Message) -> StorageResult<Message> {
        self.chats.touch(message.chat_id, message.sent_at).await?;
        self.messages.write().await.insert(message.id, message.clone());
        Ok(message)
    }

    async fn mark_delivered(&self, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>> {
        let mut messages = self.messages.write().await;
        Ok(messages.get_mut(&id).map(|message| {
            if message.delivered_at.is_none() {
                message.delivered_at = Some(at);
            }
            message.clone()
        }))
    }

    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> StorageResult<Option<Message>> {
        let mut messages = self.messages.write().await;
        Ok(messages.get_mut(&id).map(|message| {
            if message.read_at.is_none() {
                message.delivered_at.get_or_insert(at);
                message.read_at = Some(at);
            }
            message.clone()
        }))
    }

    async fn mark_all_read(&self, chat_id: Uuid, reader_id: &str, at: DateTime<Utc>) -> StorageResult<u64> {
        let mut messages = self.messages.write().await;
        let mut affected = 0;
        for message in messages
            .values_mut()
            .filter(|m| m.chat_id == chat_id && m.sender_id != reader_id && m.read_at.is_none())
        {
            message.delivered_at.get_or_insert(at);
            message.read_at = Some(at);
            affected += 1;
        }
        Ok(affected)
    }

    async fn list_by_chat(&self, chat_id: Uuid, pagination: &Pagination) -> StorageResult<(Vec<Message>, u64)> {
        let messages = self.messages.read().await;
        let mut matching: Vec<Message> = messages.values().filter(|m| m.chat_id == chat_id).cloned().collect();
        matching.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok((page, total))
    }
}
