//! Unit tests for the in-memory chat and message repositories

use chrono::{Duration, Utc};
use pz_shared::types::Pagination;
use std::sync::Arc;

use crate::domain::entities::chat::{Chat, Message};
use crate::errors::StorageErrorCode;
use crate::repositories::chat::{ChatRepository, MessageRepository, MockChatRepository, MockMessageRepository};

async fn setup() -> (Arc<MockChatRepository>, MockMessageRepository, Chat) {
    let chats = Arc::new(MockChatRepository::new());
    let chat = chats.create(Chat::new(["user_a", "user_b"])).await.unwrap();
    let messages = MockMessageRepository::new(chats.clone());
    (chats, messages, chat)
}

#[tokio::test]
async fn test_create_bumps_chat() {
    let (chats, messages, chat) = setup().await;
    let message = messages.create(Message::new(chat.id, "user_a", "hi")).await.unwrap();

    let chat = chats.find_by_id(chat.id).await.unwrap().unwrap();
    assert_eq!(chat.last_message_at, Some(message.sent_at));
}

#[tokio::test]
async fn test_create_in_missing_chat_is_foreign_key_violation() {
    let (_chats, messages, _chat) = setup().await;
    let err = messages
        .create(Message::new(uuid::Uuid::new_v4(), "user_a", "hi"))
        .await
        .unwrap_err();
    assert_eq!(err.code, StorageErrorCode::ForeignKeyViolation);
}

#[tokio::test]
async fn test_mark_delivered_keeps_first_timestamp() {
    let (_chats, messages, chat) = setup().await;
    let message = messages.create(Message::new(chat.id, "user_a", "hi")).await.unwrap();

    let first = Utc::now();
    let later = first + Duration::seconds(30);
    messages.mark_delivered(message.id, first).await.unwrap();
    let after = messages.mark_delivered(message.id, later).await.unwrap().unwrap();
    assert_eq!(after.delivered_at, Some(first));
}

#[tokio::test]
async fn test_mark_all_read_skips_own_and_read_messages() {
    let (_chats, messages, chat) = setup().await;
    messages.create(Message::new(chat.id, "user_a", "one")).await.unwrap();
    messages.create(Message::new(chat.id, "user_a", "two")).await.unwrap();
    messages.create(Message::new(chat.id, "user_b", "mine")).await.unwrap();

    assert_eq!(messages.mark_all_read(chat.id, "user_b", Utc::now()).await.unwrap(), 2);
    assert_eq!(messages.mark_all_read(chat.id, "user_b", Utc::now()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (_chats, messages, chat) = setup().await;
    let now = Utc::now();
    for (offset, text) in [(2, "oldest"), (1, "middle"), (0, "newest")] {
        let mut message = Message::new(chat.id, "user_a", text);
        message.sent_at = now - Duration::minutes(offset);
        messages.seed(message).await;
    }

    let (page, total) = messages
        .list_by_chat(chat.id, &Pagination::new(1, 2).unwrap())
        .await
        .unwrap();
    assert_eq!(total, 3);
    let texts: Vec<&str> = page.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(texts, vec!["newest", "middle"]);
}
