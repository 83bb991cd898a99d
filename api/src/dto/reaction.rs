use pz_core::domain::entities::{Reaction, ReactionType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReactionRequest {
    /// One of LIKE, LOVE, LAUGH, WOW, SAD, ANGRY
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 16))]
    pub reaction_type: String,
}

/// Body returned when a toggle swapped the reaction type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedReaction {
    #[serde(flatten)]
    pub reaction: Reaction,
    pub previous_type: ReactionType,
}

/// Body returned when a toggle or an explicit removal deleted the reaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedReaction {
    pub post_id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub removed: bool,
}

impl RemovedReaction {
    pub fn new(post_id: Uuid, user_id: impl Into<String>, reaction_type: ReactionType) -> Self {
        Self {
            post_id,
            user_id: user_id.into(),
            reaction_type,
            removed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_reads_type_field() {
        let request: ReactionRequest = serde_json::from_str(r#"{"type":"LOVE"}"#).unwrap();
        assert_eq!(request.reaction_type, "LOVE");
    }

    #[test]
    fn test_updated_reaction_is_flat() {
        let reaction = Reaction::new(Uuid::new_v4(), "user_1", ReactionType::Wow);
        let body = serde_json::to_value(UpdatedReaction {
            reaction,
            previous_type: ReactionType::Like,
        })
        .unwrap();

        assert_eq!(body["type"], "WOW");
        assert_eq!(body["previousType"], "LIKE");
        assert_eq!(body["userId"], "user_1");
    }
}
