//! Reactions on posts.

use chrono::{DateTime, Utc};
use pz_shared::errors::ApiError;
use pz_shared::validation::require_enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionType {
    Like,
    Love,
    Laugh,
    Wow,
    Sad,
    Angry,
}

impl ReactionType {
    pub const ALL: [ReactionType; 6] = [
        ReactionType::Like,
        ReactionType::Love,
        ReactionType::Laugh,
        ReactionType::Wow,
        ReactionType::Sad,
        ReactionType::Angry,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ReactionType::Like => "LIKE",
            ReactionType::Love => "LOVE",
            ReactionType::Laugh => "LAUGH",
            ReactionType::Wow => "WOW",
            ReactionType::Sad => "SAD",
            ReactionType::Angry => "ANGRY",
        }
    }

    /// Parse a wire value, listing the allowed values on failure
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let allowed = Self::ALL.map(Self::as_str);
        require_enum(value, &allowed, "reaction type")?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ApiError::validation("Invalid reaction type"))
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At most one reaction exists per (post, user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(post_id: Uuid, user_id: impl Into<String>, reaction_type: ReactionType) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id: user_id.into(),
            reaction_type,
            created_at: Utc::now(),
        }
    }
}

/// Per-type counts for a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummary {
    pub post_id: Uuid,
    pub counts: std::collections::BTreeMap<ReactionType, u64>,
    pub total: u64,
    /// The viewer's current reaction, if any
    pub viewer_reaction: Option<ReactionType>,
}
