//! Post and comment lookups used by interaction and moderation services.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::post::{Comment, Post};
use crate::errors::StorageResult;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Soft-deleted posts are still returned; callers decide how to treat them
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Post>>;

    async fn create(&self, post: Post) -> StorageResult<Post>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Comment>>;

    /// `ForeignKeyViolation` on `post_id` when the post does not exist
    async fn create(&self, comment: Comment) -> StorageResult<Comment>;
}
