//! Moderation flag persistence.

use async_trait::async_trait;
use pz_shared::types::Pagination;
use uuid::Uuid;

use crate::domain::entities::moderation::{FlagStatus, FlaggedEntityType, ModerationFlag};
use crate::errors::StorageResult;

#[async_trait]
pub trait ModerationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<ModerationFlag>>;

    /// The reporter's existing flag on this entity, whatever its status
    async fn find_by_reporter(
        &self,
        reporter_id: &str,
        entity_type: FlaggedEntityType,
        entity_id: &str,
    ) -> StorageResult<Option<ModerationFlag>>;

    /// `UniqueViolation` when the reporter already flagged the entity
    async fn create(&self, flag: ModerationFlag) -> StorageResult<ModerationFlag>;

    /// Persist status and reviewer; `RecordNotFound` when the flag is gone
    async fn update(&self, flag: ModerationFlag) -> StorageResult<ModerationFlag>;

    /// Oldest first, optionally filtered by status, with the total count
    async fn list(
        &self,
        status: Option<FlagStatus>,
        pagination: &Pagination,
    ) -> StorageResult<(Vec<ModerationFlag>, u64)>;
}
