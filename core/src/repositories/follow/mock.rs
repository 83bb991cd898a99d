//! Mock implementation of FollowRepository for testing

use async_trait::async_trait;
use pz_shared::types::Pagination;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::follow::Follow;
use crate::errors::{StorageError, StorageResult};

use super::trait_::FollowRepository;

#[derive(Default)]
pub struct MockFollowRepository {
    follows: Arc<RwLock<Vec<Follow>>>,
}

impl MockFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn page_where<F>(&self, pagination: &Pagination, predicate: F) -> (Vec<Follow>, u64)
    where
        F: Fn(&Follow) -> bool,
    {
        let follows = self.follows.read().await;
        let mut matching: Vec<Follow> = follows.iter().filter(|f| predicate(f)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        (page, total)
    }
}

#[async_trait]
impl FollowRepository for MockFollowRepository {
    async fn find(&self, follower_id: &str, followee_id: &str) -> StorageResult<Option<Follow>> {
        let follows = self.follows.read().await;
        Ok(follows
            .iter()
            .find(|f| f.follower_id == follower_id && f.followee_id == followee_id)
            .cloned())
    }

    async fn create(&self, follow: Follow) -> StorageResult<Follow> {
        let mut follows = self.follows.write().await;
        if follows
            .iter()
            .any(|f| f.follower_id == follow.follower_id && f.followee_id == follow.followee_id)
        {
            return Err(StorageError::unique_violation(["follow"]).with_constraint("PRIMARY"));
        }
        follows.push(follow.clone());
        Ok(follow)
    }

    async fn delete(&self, follower_id: &str, followee_id: &str) -> StorageResult<bool> {
        let mut follows = self.follows.write().await;
        let before = follows.len();
        follows.retain(|f| !(f.follower_id == follower_id && f.followee_id == followee_id));
        Ok(follows.len() != before)
    }

    async fn list_followers(&self, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)> {
        Ok(self.page_where(pagination, |f| f.followee_id == user_id).await)
    }

    async fn list_following(&self, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)> {
        Ok(self.page_where(pagination, |f| f.follower_id == user_id).await)
    }
}
