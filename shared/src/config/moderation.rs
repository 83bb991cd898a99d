//! Moderation settings

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::env_list;

/// Users allowed to review moderation flags
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModerationConfig {
    #[serde(default)]
    pub moderator_ids: HashSet<String>,
}

impl ModerationConfig {
    pub fn from_env() -> Self {
        Self {
            moderator_ids: env_list("MODERATOR_USER_IDS").into_iter().collect(),
        }
    }

    pub fn with_moderators<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            moderator_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_moderator(&self, user_id: &str) -> bool {
        self.moderator_ids.contains(user_id)
    }
}
