//! Directed follow relation between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `follower_id` follows `followee_id`; never the same user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: impl Into<String>, followee_id: impl Into<String>) -> Self {
        Self {
            follower_id: follower_id.into(),
            followee_id: followee_id.into(),
            created_at: Utc::now(),
        }
    }
}
