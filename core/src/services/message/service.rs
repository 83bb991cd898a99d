//! Message sending and delivery/read receipts

use chrono::Utc;
use pz_shared::types::{Page, Pagination};
use pz_shared::validation::{require_string_length, sanitize_html, LengthBounds};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::chat::{Chat, DeliveryOutcome, Message};
use crate::errors::{ApiError, ApiResult};
use crate::repositories::{ChatRepository, MessageRepository};

pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Delivery state is forward-only; repeated or sender-issued receipts are no-ops.
pub struct MessageService {
    chats: Arc<dyn ChatRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(chats: Arc<dyn ChatRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self { chats, messages }
    }

    pub async fn send(&self, chat_id: Uuid, sender_id: &str, content: &str) -> ApiResult<Message> {
        self.participant_chat(chat_id, sender_id).await?;

        let content = sanitize_html(content);
        require_string_length(&content, "Message content", LengthBounds::new(1, MAX_MESSAGE_LENGTH))?;

        let message = self.messages.create(Message::new(chat_id, sender_id, content)).await?;
        tracing::debug!(%chat_id, message_id = %message.id, "message sent");
        Ok(message)
    }

    pub async fn list(&self, chat_id: Uuid, user_id: &str, pagination: &Pagination) -> ApiResult<Page<Message>> {
        self.participant_chat(chat_id, user_id).await?;
        let (items, total) = self.messages.list_by_chat(chat_id, pagination).await?;
        Ok(Page::new(items, pagination, total))
    }

    pub async fn mark_delivered(&self, message_id: Uuid, user_id: &str) -> ApiResult<DeliveryOutcome> {
        let message = self.participant_message(message_id, user_id).await?;
        if message.is_sent_by(user_id) || message.is_delivered() {
            return Ok(DeliveryOutcome { message, changed: false });
        }

        let updated = self
            .messages
            .mark_delivered(message_id, Utc::now())
            .await?
            .ok_or_else(|| ApiError::not_found("Message"))?;

        let changed = updated.delivered_at != message.delivered_at;
        Ok(DeliveryOutcome { message: updated, changed })
    }

    /// Marks read and backfills `delivered_at` when the delivery receipt never arrived
    pub async fn mark_read(&self, message_id: Uuid, user_id: &str) -> ApiResult<DeliveryOutcome> {
        let message = self.participant_message(message_id, user_id).await?;
        if message.is_sent_by(user_id) || message.is_read() {
            return Ok(DeliveryOutcome { message, changed: false });
        }

        let updated = self
            .messages
            .mark_read(message_id, Utc::now())
            .await?
            .ok_or_else(|| ApiError::not_found("Message"))?;

        let changed = updated.read_at != message.read_at;
        Ok(DeliveryOutcome { message: updated, changed })
    }

    /// Returns how many messages changed
    pub async fn mark_all_read(&self, chat_id: Uuid, user_id: &str) -> ApiResult<u64> {
        self.participant_chat(chat_id, user_id).await?;
        let count = self.messages.mark_all_read(chat_id, user_id, Utc::now()).await?;
        tracing::debug!(%chat_id, user_id, count, "chat marked read");
        Ok(count)
    }

    async fn participant_chat(&self, chat_id: Uuid, user_id: &str) -> ApiResult<Chat> {
        let chat = self
            .chats
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Chat"))?;

        if !chat.is_participant(user_id) {
            return Err(ApiError::authorization("You are not a participant in this chat"));
        }
        Ok(chat)
    }

    async fn participant_message(&self, message_id: Uuid, user_id: &str) -> ApiResult<Message> {
        let message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Message"))?;

        self.participant_chat(message.chat_id, user_id).await?;
        Ok(message)
    }
}
