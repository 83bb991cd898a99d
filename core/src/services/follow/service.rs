//! Follow and unfollow between users

use pz_shared::types::{Page, Pagination};
use std::sync::Arc;

use crate::domain::entities::follow::Follow;
use crate::errors::{ApiError, ApiResult};
use crate::repositories::{FollowRepository, UserRepository};

pub struct FollowService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl FollowService {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    /// `follower_id` starts following `followee_id`
    ///
    /// Self-follow is rejected before any lookup, so it is a validation
    /// error even for unknown users.
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> ApiResult<Follow> {
        if follower_id == followee_id {
            return Err(ApiError::validation("You cannot follow yourself"));
        }

        self.require_user(follower_id).await?;
        self.require_user(followee_id).await?;

        if self.follows.find(follower_id, followee_id).await?.is_some() {
            return Err(ApiError::conflict("You are already following this user")
                .with_detail("followeeId", followee_id));
        }

        let follow = self.follows.create(Follow::new(follower_id, followee_id)).await?;
        tracing::info!(follower_id, followee_id, "user followed");
        Ok(follow)
    }

    pub async fn unfollow(&self, follower_id: &str, followee_id: &str) -> ApiResult<()> {
        if self.follows.find(follower_id, followee_id).await?.is_none() {
            return Err(ApiError::not_found("Follow relationship"));
        }

        self.follows.delete(follower_id, followee_id).await?;
        tracing::info!(follower_id, followee_id, "user unfollowed");
        Ok(())
    }

    pub async fn followers(&self, user_id: &str, pagination: &Pagination) -> ApiResult<Page<Follow>> {
        self.require_user(user_id).await?;
        let (items, total) = self.follows.list_followers(user_id, pagination).await?;
        Ok(Page::new(items, pagination, total))
    }

    pub async fn following(&self, user_id: &str, pagination: &Pagination) -> ApiResult<Page<Follow>> {
        self.require_user(user_id).await?;
        let (items, total) = self.follows.list_following(user_id, pagination).await?;
        Ok(Page::new(items, pagination, total))
    }

    async fn require_user(&self, user_id: &str) -> ApiResult<()> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("User"))
        }
    }
}
