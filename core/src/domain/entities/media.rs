//! Hosted media assets.

use pz_shared::errors::ApiError;
use pz_shared::validation::require_enum;
use serde::{Deserialize, Serialize};

const MB: usize = 1024 * 1024;

/// Upload profile deciding size cap and hosting resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadProfile {
    Avatar,
    Image,
    Video,
}

impl UploadProfile {
    pub const ALL: [UploadProfile; 3] = [UploadProfile::Avatar, UploadProfile::Image, UploadProfile::Video];

    pub const fn as_str(self) -> &'static str {
        match self {
            UploadProfile::Avatar => "avatar",
            UploadProfile::Image => "image",
            UploadProfile::Video => "video",
        }
    }

    pub const fn max_bytes(self) -> usize {
        match self {
            UploadProfile::Avatar => 5 * MB,
            UploadProfile::Image => 10 * MB,
            UploadProfile::Video => 100 * MB,
        }
    }

    /// Resource type segment of the hosting API path
    pub const fn resource_type(self) -> &'static str {
        match self {
            UploadProfile::Avatar | UploadProfile::Image => "image",
            UploadProfile::Video => "video",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let allowed = Self::ALL.map(Self::as_str);
        require_enum(value, &allowed, "upload profile")?;
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str() == value)
            .ok_or_else(|| ApiError::validation("Invalid upload profile"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_caps() {
        assert_eq!(UploadProfile::Avatar.max_bytes(), 5 * 1024 * 1024);
        assert_eq!(UploadProfile::Image.max_bytes(), 10 * 1024 * 1024);
        assert_eq!(UploadProfile::Video.max_bytes(), 100 * 1024 * 1024);
        assert_eq!(UploadProfile::Avatar.resource_type(), "image");
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!(UploadProfile::parse("video").unwrap(), UploadProfile::Video);
        assert!(UploadProfile::parse("gif").is_err());
    }
}
