//! In-memory media host for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::media::{MediaAsset, UploadProfile};
use crate::errors::MediaHostError;

use super::service::MediaHost;

#[derive(Default)]
pub struct MockMediaHost {
    assets: Arc<RwLock<HashMap<String, MediaAsset>>>,
    next_failure: Arc<RwLock<Option<MediaHostError>>>,
}

impl MockMediaHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `error`
    pub async fn fail_next(&self, error: MediaHostError) {
        *self.next_failure.write().await = Some(error);
    }

    pub async fn stored(&self) -> Vec<MediaAsset> {
        self.assets.read().await.values().cloned().collect()
    }

    async fn take_failure(&self) -> Result<(), MediaHostError> {
        match self.next_failure.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MediaHost for MockMediaHost {
    async fn upload(&self, bytes: Vec<u8>, profile: UploadProfile, public_id: &str) -> Result<MediaAsset, MediaHostError> {
        self.take_failure().await?;
        let asset = MediaAsset {
            url: format!("https://media.test/{}/{}", profile.resource_type(), public_id),
            public_id: public_id.to_string(),
            width: None,
            height: None,
            duration_seconds: None,
            bytes: bytes.len() as u64,
        };
        self.assets.write().await.insert(asset.public_id.clone(), asset.clone());
        Ok(asset)
    }

    async fn delete(&self, public_id: &str, _profile: UploadProfile) -> Result<(), MediaHostError> {
        self.take_failure().await?;
        match self.assets.write().await.remove(public_id) {
            Some(_) => Ok(()),
            None => Err(MediaHostError::new(Some(404), "Resource not found")),
        }
    }
}
