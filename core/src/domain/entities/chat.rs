//! Chats and their messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: Uuid,
    pub participant_ids: Vec<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    pub fn new<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            participant_ids: participants.into_iter().map(Into::into).collect(),
            last_message_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }
}

/// Delivery state only moves forward: sent, then delivered, then read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(chat_id: Uuid, sender_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            chat_id,
            sender_id: sender_id.into(),
            content: content.into(),
            sent_at: Utc::now(),
            delivered_at: None,
            read_at: None,
        }
    }

    pub fn is_sent_by(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered_at.is_some()
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Result of a delivery/read transition; `changed` is false for no-ops
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub message: Message,
    pub changed: bool,
}
