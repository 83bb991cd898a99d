//! Posts and comments: the content users react to and report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub is_deleted: bool,
    /// Ephemeral posts stop accepting interactions after this instant
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author_id.into(),
            content: content.into(),
            is_deleted: false,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: String,
    pub content: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id: author_id.into(),
            content: content.into(),
            is_deleted: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let post = Post::new("user_1", "hello").with_expiry(now);
        assert!(post.is_expired_at(now));
        assert!(!post.is_expired_at(now - Duration::seconds(1)));
        assert!(!Post::new("user_1", "hello").is_expired_at(now));
    }
}
