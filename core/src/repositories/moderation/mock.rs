//! Mock implementation of ModerationRepository for testing

use async_trait::async_trait;
use pz_shared::types::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::moderation::{FlagStatus, FlaggedEntityType, ModerationFlag};
use crate::errors::{StorageError, StorageResult};

use super::trait_::ModerationRepository;

#[derive(Default)]
pub struct MockModerationRepository {
    flags: Arc<RwLock<HashMap<Uuid, ModerationFlag>>>,
}

impl MockModerationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModerationRepository for MockModerationRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<ModerationFlag>> {
        Ok(self.flags.read().await.get(&id).cloned())
    }

    async fn find_by_reporter(
        &self,
        reporter_id: &str,
        entity_type: FlaggedEntityType,
        entity_id: &str,
    ) -> StorageResult<Option<ModerationFlag>> {
        let flags = self.flags.read().await;
        Ok(flags
            .values()
            .find(|f| f.reporter_id == reporter_id && f.entity_type == entity_type && f.entity_id == entity_id)
            .cloned())
    }

    async fn create(&self, flag: ModerationFlag) -> StorageResult<ModerationFlag> {
        let mut flags = self.flags.write().await;
        if flags.values().any(|f| {
            f.reporter_id == flag.reporter_id && f.entity_type == flag.entity_type && f.entity_id == flag.entity_id
        }) {
            return Err(StorageError::unique_violation(["flag"]).with_constraint("uq_flags_reporter_entity"));
        }
        flags.insert(flag.id, flag.clone());
        Ok(flag)
    }

    async fn update(&self, flag: ModerationFlag) -> StorageResult<ModerationFlag> {
        let mut flags = self.flags.write().await;
        match flags.get_mut(&flag.id) {
            Some(stored) => {
                *stored = flag.clone();
                Ok(flag)
            }
            None => Err(StorageError::record_not_found("Flag to update does not exist")),
        }
    }

    async fn list(
        &self,
        status: Option<FlagStatus>,
        pagination: &Pagination,
    ) -> StorageResult<(Vec<ModerationFlag>, u64)> {
        let flags = self.flags.read().await;
        let mut matching: Vec<ModerationFlag> = flags
            .values()
            .filter(|f| status.map_or(true, |s| f.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok((page, total))
    }
}
