//! Media host clients

pub mod cloudinary;

use async_trait::async_trait;
use pz_core::domain::entities::media::{MediaAsset, UploadProfile};
use pz_core::errors::MediaHostError;
use pz_core::services::MediaHost;

pub use cloudinary::CloudinaryMediaHost;

/// Stand-in used when no media credentials are configured; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredMediaHost;

#[async_trait]
impl MediaHost for UnconfiguredMediaHost {
    async fn upload(&self, _bytes: Vec<u8>, _profile: UploadProfile, _public_id: &str) -> Result<MediaAsset, MediaHostError> {
        Err(MediaHostError::transport("Media host is not configured"))
    }

    async fn delete(&self, _public_id: &str, _profile: UploadProfile) -> Result<(), MediaHostError> {
        Err(MediaHostError::transport("Media host is not configured"))
    }
}
