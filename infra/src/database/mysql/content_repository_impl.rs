//! MySQL implementations of the PostRepository and CommentRepository traits.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use pz_core::domain::entities::post::{Comment, Post};
use pz_core::errors::StorageResult;
use pz_core::repositories::{CommentRepository, PostRepository};

use super::rows::{column, uuid_column};
use crate::database::error_mapping::map_sqlx_error;

pub struct MySqlPostRepository {
    pool: MySqlPool,
}

impl MySqlPostRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: &MySqlRow) -> StorageResult<Post> {
        Ok(Post {
            id: uuid_column(row, "id")?,
            author_id: column(row, "author_id")?,
            content: column(row, "content")?,
            is_deleted: column(row, "is_deleted")?,
            expires_at: column(row, "expires_at")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl PostRepository for MySqlPostRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Post>> {
        let query = r#"
            SELECT id, author_id, content, is_deleted, expires_at, created_at
            FROM posts
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_post).transpose()
    }

    async fn create(&self, post: Post) -> StorageResult<Post> {
        let query = r#"
            INSERT INTO posts (id, author_id, content, is_deleted, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(post.id.to_string())
            .bind(&post.author_id)
            .bind(&post.content)
            .bind(post.is_deleted)
            .bind(post.expires_at)
            .bind(post.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(post)
    }
}

pub struct MySqlCommentRepository {
    pool: MySqlPool,
}

impl MySqlCommentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &MySqlRow) -> StorageResult<Comment> {
        Ok(Comment {
            id: uuid_column(row, "id")?,
            post_id: uuid_column(row, "post_id")?,
            author_id: column(row, "author_id")?,
            content: column(row, "content")?,
            is_deleted: column(row, "is_deleted")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl CommentRepository for MySqlCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Comment>> {
        let query = r#"
            SELECT id, post_id, author_id, content, is_deleted, created_at
            FROM comments
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_comment).transpose()
    }

    async fn create(&self, comment: Comment) -> StorageResult<Comment> {
        let query = r#"
            INSERT INTO comments (id, post_id, author_id, content, is_deleted, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(comment.id.to_string())
            .bind(comment.post_id.to_string())
            .bind(&comment.author_id)
            .bind(&comment.content)
            .bind(comment.is_deleted)
            .bind(comment.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(comment)
    }
}
