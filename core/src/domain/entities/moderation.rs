//! Moderation flags raised by users against content or other users.

use chrono::{DateTime, Utc};
use pz_shared::errors::ApiError;
use pz_shared::validation::require_enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlaggedEntityType {
    Post,
    Comment,
    User,
    Message,
}

impl FlaggedEntityType {
    pub const ALL: [FlaggedEntityType; 4] = [
        FlaggedEntityType::Post,
        FlaggedEntityType::Comment,
        FlaggedEntityType::User,
        FlaggedEntityType::Message,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FlaggedEntityType::Post => "POST",
            FlaggedEntityType::Comment => "COMMENT",
            FlaggedEntityType::User => "USER",
            FlaggedEntityType::Message => "MESSAGE",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let allowed = Self::ALL.map(Self::as_str);
        require_enum(value, &allowed, "entity type")?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ApiError::validation("Invalid entity type"))
    }
}

impl fmt::Display for FlaggedEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlagStatus {
    Pending,
    Valid,
    Invalid,
}

impl FlagStatus {
    pub const ALL: [FlagStatus; 3] = [FlagStatus::Pending, FlagStatus::Valid, FlagStatus::Invalid];

    pub const fn as_str(self) -> &'static str {
        match self {
            FlagStatus::Pending => "PENDING",
            FlagStatus::Valid => "VALID",
            FlagStatus::Invalid => "INVALID",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let allowed = Self::ALL.map(Self::as_str);
        require_enum(value, &allowed, "status")?;
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ApiError::validation("Invalid status"))
    }
}

impl fmt::Display for FlagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique per (reporter, entity type, entity id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationFlag {
    pub id: Uuid,
    pub entity_type: FlaggedEntityType,
    pub entity_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub status: FlagStatus,
    pub reviewed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ModerationFlag {
    pub fn new(
        entity_type: FlaggedEntityType,
        entity_id: impl Into<String>,
        reporter_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            entity_type,
            entity_id: entity_id.into(),
            reporter_id: reporter_id.into(),
            reason: reason.into(),
            status: FlagStatus::Pending,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn review(&mut self, status: FlagStatus, moderator_id: impl Into<String>) {
        self.status = status;
        self.reviewed_by = Some(moderator_id.into());
        self.updated_at = Utc::now();
    }
}
