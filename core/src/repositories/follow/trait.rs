//! Follow relation persistence.

use async_trait::async_trait;
use pz_shared::types::Pagination;

use crate::domain::entities::follow::Follow;
use crate::errors::StorageResult;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find(&self, follower_id: &str, followee_id: &str) -> StorageResult<Option<Follow>>;

    /// `UniqueViolation` when the pair already exists
    async fn create(&self, follow: Follow) -> StorageResult<Follow>;

    async fn delete(&self, follower_id: &str, followee_id: &str) -> StorageResult<bool>;

    /// Users following `user_id`, newest first, with the total count
    async fn list_followers(&self, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)>;

    /// Users `user_id` follows, newest first, with the total count
    async fn list_following(&self, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)>;
}
