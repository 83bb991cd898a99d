//! In-memory post and comment repositories for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::post::{Comment, Post};
use crate::errors::{StorageError, StorageResult};

use super::trait_::{CommentRepository, PostRepository};

#[derive(Default)]
pub struct MockPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl MockPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MockPostRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn create(&self, post: Post) -> StorageResult<Post> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(StorageError::unique_violation(["id"]).with_constraint("PRIMARY"));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }
}

/// Comments check their post against the shared post store
pub struct MockCommentRepository {
    comments: Arc<RwLock<HashMap<Uuid, Comment>>>,
    posts: Arc<MockPostRepository>,
}

impl MockCommentRepository {
    pub fn new(posts: Arc<MockPostRepository>) -> Self {
        Self {
            comments: Arc::new(RwLock::new(HashMap::new())),
            posts,
        }
    }
}

#[async_trait]
impl CommentRepository for MockCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Comment>> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn create(&self, comment: Comment) -> StorageResult<Comment> {
        if self.posts.find_by_id(comment.post_id).await?.is_none() {
            return Err(StorageError::foreign_key_violation("post_id").with_constraint("fk_comments_post"));
        }
        let mut comments = self.comments.write().await;
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }
}
