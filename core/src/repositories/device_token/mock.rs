//! Mock implementation of DeviceTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::device_token::DeviceToken;
use crate::errors::{StorageError, StorageResult};

use super::trait_::DeviceTokenRepository;

#[derive(Default)]
pub struct MockDeviceTokenRepository {
    tokens: Arc<RwLock<HashMap<String, DeviceToken>>>,
    /// Pretend the next lookup misses, as if another request inserted concurrently
    hide_next_lookup: Arc<RwLock<bool>>,
}

impl MockDeviceTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `find_by_token` return `None` to simulate a lost insert race
    pub async fn simulate_race(&self) {
        *self.hide_next_lookup.write().await = true;
    }
}

#[async_trait]
impl DeviceTokenRepository for MockDeviceTokenRepository {
    async fn find_by_token(&self, token: &str) -> StorageResult<Option<DeviceToken>> {
        let mut hide = self.hide_next_lookup.write().await;
        if *hide {
            *hide = false;
            return Ok(None);
        }
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn create(&self, device: DeviceToken) -> StorageResult<DeviceToken> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&device.token) {
            return Err(StorageError::unique_violation(["token"]).with_constraint("uq_device_tokens_token"));
        }
        tokens.insert(device.token.clone(), device.clone());
        Ok(device)
    }

    async fn update(&self, device: DeviceToken) -> StorageResult<DeviceToken> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(&device.token) {
            Some(stored) => {
                *stored = device.clone();
                Ok(device)
            }
            None => Err(StorageError::record_not_found("Device token does not exist")),
        }
    }

    async fn delete(&self, token: &str) -> StorageResult<bool> {
        Ok(self.tokens.write().await.remove(token).is_some())
    }
}
