//! Push notification device tokens.

use chrono::{DateTime, Utc};
use pz_shared::errors::ApiError;
use pz_shared::validation::require_enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DevicePlatform {
    Ios,
    Android,
    Web,
}

impl DevicePlatform {
    pub const ALL: [DevicePlatform; 3] = [DevicePlatform::Ios, DevicePlatform::Android, DevicePlatform::Web];

    pub const fn as_str(self) -> &'static str {
        match self {
            DevicePlatform::Ios => "IOS",
            DevicePlatform::Android => "ANDROID",
            DevicePlatform::Web => "WEB",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let allowed = Self::ALL.map(Self::as_str);
        require_enum(value, &allowed, "platform")?;
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == value)
            .ok_or_else(|| ApiError::validation("Invalid platform"))
    }
}

/// A token belongs to exactly one user at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    pub token: String,
    pub user_id: String,
    pub platform: DevicePlatform,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeviceToken {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>, platform: DevicePlatform) -> Self {
        let now = Utc::now();
        Self {
            token: token.into(),
            user_id: user_id.into(),
            platform,
            created_at: now,
            updated_at: now,
        }
    }
}
