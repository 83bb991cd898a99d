//! Push notification token persistence.

use async_trait::async_trait;

use crate::domain::entities::device_token::DeviceToken;
use crate::errors::StorageResult;

#[async_trait]
pub trait DeviceTokenRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> StorageResult<Option<DeviceToken>>;

    /// `UniqueViolation` on `token` when it is already registered
    async fn create(&self, device: DeviceToken) -> StorageResult<DeviceToken>;

    /// Rewrite owner, platform and `updated_at` of an existing token
    async fn update(&self, device: DeviceToken) -> StorageResult<DeviceToken>;

    async fn delete(&self, token: &str) -> StorageResult<bool>;
}
