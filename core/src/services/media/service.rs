//! Media uploads through an external media host

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::media::{MediaAsset, UploadProfile};
use crate::errors::{ApiError, ApiResult, MediaHostError};

/// External media host (Cloudinary in production)
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Store `bytes` under `public_id` (relative to the host's folder)
    async fn upload(&self, bytes: Vec<u8>, profile: UploadProfile, public_id: &str) -> Result<MediaAsset, MediaHostError>;

    async fn delete(&self, public_id: &str, profile: UploadProfile) -> Result<(), MediaHostError>;
}

pub struct MediaService {
    host: Arc<dyn MediaHost>,
}

impl MediaService {
    pub fn new(host: Arc<dyn MediaHost>) -> Self {
        Self { host }
    }

    /// Upload within the profile's size cap; the asset lands under the uploader's namespace
    pub async fn upload(&self, bytes: Vec<u8>, profile: UploadProfile, uploader_id: &str) -> ApiResult<MediaAsset> {
        if bytes.is_empty() {
            return Err(ApiError::validation("File is empty"));
        }
        if bytes.len() > profile.max_bytes() {
            return Err(ApiError::validation("File too large")
                .with_detail("maxBytes", profile.max_bytes())
                .with_detail("profile", profile.as_str()));
        }

        let public_id = format!("users/{}/{}/{}", uploader_id, profile.as_str(), Uuid::new_v4());
        let asset = self.host.upload(bytes, profile, &public_id).await?;
        tracing::info!(uploader_id, public_id = %asset.public_id, bytes = asset.bytes, "media uploaded");
        Ok(asset)
    }

    /// Only the uploader may delete an asset
    pub async fn delete(&self, public_id: &str, requester_id: &str) -> ApiResult<()> {
        let profile = owned_profile(public_id, requester_id)
            .ok_or_else(|| ApiError::authorization("You can only delete your own media"))?;

        self.host.delete(public_id, profile).await?;
        Ok(())
    }
}

/// Profile of an asset stored under `users/{owner}/{profile}/...`, when `owner` matches
fn owned_profile(public_id: &str, owner: &str) -> Option<UploadProfile> {
    let segments: Vec<&str> = public_id.split('/').collect();
    segments.windows(3).find_map(|window| match window {
        ["users", id, profile] if *id == owner => UploadProfile::parse(profile).ok(),
        _ => None,
    })
}
