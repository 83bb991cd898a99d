use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Sanitized and re-checked by the message service
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Result of marking a whole chat as read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub updated: u64,
}
