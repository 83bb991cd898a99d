//! Reaction persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::reaction::{Reaction, ReactionType};
use crate::errors::StorageResult;

/// At most one reaction per (post, user); a second insert is a `UniqueViolation`
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn find_by_post_and_user(&self, post_id: Uuid, user_id: &str) -> StorageResult<Option<Reaction>>;

    async fn create(&self, reaction: Reaction) -> StorageResult<Reaction>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;

    /// Delete `existing_id` and insert `replacement` in one transaction
    async fn replace(&self, existing_id: Uuid, replacement: Reaction) -> StorageResult<Reaction>;

    /// Count per reaction type; types without reactions are omitted
    async fn count_by_type(&self, post_id: Uuid) -> StorageResult<Vec<(ReactionType, u64)>>;
}
