//! Mock implementation of ReactionRepository for testing

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::reaction::{Reaction, ReactionType};
use crate::errors::{StorageError, StorageResult};

use super::trait_::ReactionRepository;

#[derive(Default)]
pub struct MockReactionRepository {
    reactions: Arc<RwLock<HashMap<Uuid, Reaction>>>,
}

impl MockReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows for a (post, user) pair
    pub async fn count_for(&self, post_id: Uuid, user_id: &str) -> usize {
        self.reactions
            .read()
            .await
            .values()
            .filter(|r| r.post_id == post_id && r.user_id == user_id)
            .count()
    }

    fn duplicate() -> StorageError {
        StorageError::unique_violation(["reaction"]).with_constraint("uq_reactions_post_user")
    }
}

#[async_trait]
impl ReactionRepository for MockReactionRepository {
    async fn find_by_post_and_user(&self, post_id: Uuid, user_id: &str) -> StorageResult<Option<Reaction>> {
        let reactions = self.reactions.read().await;
        Ok(reactions
            .values()
            .find(|r| r.post_id == post_id && r.user_id == user_id)
            .cloned())
    }

    async fn create(&self, reaction: Reaction) -> StorageResult<Reaction> {
        let mut reactions = self.reactions.write().await;
        if reactions
            .values()
            .any(|r| r.post_id == reaction.post_id && r.user_id == reaction.user_id)
        {
            return Err(Self::duplicate());
        }
        reactions.insert(reaction.id, reaction.clone());
        Ok(reaction)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self.reactions.write().await.remove(&id).is_some())
    }

    async fn replace(&self, existing_id: Uuid, replacement: Reaction) -> StorageResult<Reaction> {
        let mut reactions = self.reactions.write().await;
        if reactions.remove(&existing_id).is_none() {
            return Err(StorageError::record_not_found("Reaction to replace does not exist"));
        }
        if reactions
            .values()
            .any(|r| r.post_id == replacement.post_id && r.user_id == replacement.user_id)
        {
            return Err(Self::duplicate());
        }
        reactions.insert(replacement.id, replacement.clone());
        Ok(replacement)
    }

    async fn count_by_type(&self, post_id: Uuid) -> StorageResult<Vec<(ReactionType, u64)>> {
        let reactions = self.reactions.read().await;
        let mut counts: BTreeMap<ReactionType, u64> = BTreeMap::new();
        for reaction in reactions.values().filter(|r| r.post_id == post_id) {
            *counts.entry(reaction.reaction_type).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }
}
