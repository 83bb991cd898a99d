//! Reaction toggling on posts

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::post::Post;
use crate::domain::entities::reaction::{Reaction, ReactionSummary, ReactionType};
use crate::errors::{ApiError, ApiResult};
use crate::repositories::{PostRepository, ReactionRepository};

/// What a toggle did to the caller's reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No reaction existed; one was created
    Created(Reaction),
    /// A reaction of another type was swapped for the requested one
    Updated {
        previous: ReactionType,
        reaction: Reaction,
    },
    /// The same type was requested again, so the reaction was removed
    Removed {
        post_id: Uuid,
        user_id: String,
        reaction_type: ReactionType,
    },
}

/// Service keeping at most one reaction per (post, user)
pub struct ReactionService {
    posts: Arc<dyn PostRepository>,
    reactions: Arc<dyn ReactionRepository>,
}

impl ReactionService {
    pub fn new(posts: Arc<dyn PostRepository>, reactions: Arc<dyn ReactionRepository>) -> Self {
        Self { posts, reactions }
    }

    /// Create, switch or remove the caller's reaction on a post
    ///
    /// # Errors
    /// * `NotFound` - post missing or soft-deleted
    /// * `Gone` - post expired
    pub async fn toggle(&self, post_id: Uuid, user_id: &str, requested: ReactionType) -> ApiResult<ToggleOutcome> {
        self.reactable_post(post_id).await?;

        let outcome = match self.reactions.find_by_post_and_user(post_id, user_id).await? {
            None => {
                let reaction = self
                    .reactions
                    .create(Reaction::new(post_id, user_id, requested))
                    .await?;
                ToggleOutcome::Created(reaction)
            }
            Some(existing) if existing.reaction_type == requested => {
                self.reactions.delete(existing.id).await?;
                ToggleOutcome::Removed {
                    post_id,
                    user_id: user_id.to_string(),
                    reaction_type: existing.reaction_type,
                }
            }
            Some(existing) => {
                let reaction = self
                    .reactions
                    .replace(existing.id, Reaction::new(post_id, user_id, requested))
                    .await?;
                ToggleOutcome::Updated {
                    previous: existing.reaction_type,
                    reaction,
                }
            }
        };

        tracing::debug!(%post_id, user_id, ?outcome, "reaction toggled");
        Ok(outcome)
    }

    /// Remove the caller's reaction regardless of type
    pub async fn remove(&self, post_id: Uuid, user_id: &str) -> ApiResult<Reaction> {
        let existing = self
            .reactions
            .find_by_post_and_user(post_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Reaction"))?;

        self.reactions.delete(existing.id).await?;
        Ok(existing)
    }

    /// Per-type counts plus the viewer's own reaction
    pub async fn summary(&self, post_id: Uuid, viewer_id: Option<&str>) -> ApiResult<ReactionSummary> {
        self.posts
            .find_by_id(post_id)
            .await?
            .filter(|post| !post.is_deleted)
            .ok_or_else(|| ApiError::not_found("Post"))?;

        let counts: BTreeMap<ReactionType, u64> = self.reactions.count_by_type(post_id).await?.into_iter().collect();
        let total = counts.values().sum();

        let viewer_reaction = match viewer_id {
            Some(viewer_id) => self
                .reactions
                .find_by_post_and_user(post_id, viewer_id)
                .await?
                .map(|reaction| reaction.reaction_type),
            None => None,
        };

        Ok(ReactionSummary {
            post_id,
            counts,
            total,
            viewer_reaction,
        })
    }

    async fn reactable_post(&self, post_id: Uuid) -> ApiResult<Post> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .filter(|post| !post.is_deleted)
            .ok_or_else(|| ApiError::not_found("Post"))?;

        if post.is_expired_at(Utc::now()) {
            return Err(ApiError::gone("Post has expired").with_detail("postId", post_id));
        }
        Ok(post)
    }
}
