//! MySQL implementation of the FollowRepository trait.

use async_trait::async_trait;
use pz_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use pz_core::domain::entities::follow::Follow;
use pz_core::errors::StorageResult;
use pz_core::repositories::FollowRepository;

use super::rows::{column, count_column};
use crate::database::error_mapping::map_sqlx_error;

/// Which side of the relationship a listing is keyed on
#[derive(Clone, Copy)]
enum Side {
    Followers,
    Following,
}

impl Side {
    const fn key_column(self) -> &'static str {
        match self {
            Side::Followers => "followee_id",
            Side::Following => "follower_id",
        }
    }
}

pub struct MySqlFollowRepository {
    pool: MySqlPool,
}

impl MySqlFollowRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_follow(row: &MySqlRow) -> StorageResult<Follow> {
        Ok(Follow {
            follower_id: column(row, "follower_id")?,
            followee_id: column(row, "followee_id")?,
            created_at: column(row, "created_at")?,
        })
    }

    async fn list(&self, side: Side, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)> {
        let key = side.key_column();

        let total_query = format!("SELECT COUNT(*) AS total FROM follows WHERE {key} = ?");
        let total_row = sqlx::query(&total_query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let total = count_column(&total_row, "total")?;

        let page_query = format!(
            "SELECT follower_id, followee_id, created_at FROM follows \
             WHERE {key} = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query(&page_query)
            .bind(user_id)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let follows = rows.iter().map(Self::row_to_follow).collect::<StorageResult<Vec<_>>>()?;
        Ok((follows, total))
    }
}

#[async_trait]
impl FollowRepository for MySqlFollowRepository {
    async fn find(&self, follower_id: &str, followee_id: &str) -> StorageResult<Option<Follow>> {
        let query = r#"
            SELECT follower_id, followee_id, created_at
            FROM follows
            WHERE follower_id = ? AND followee_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(follower_id)
            .bind(followee_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_follow).transpose()
    }

    async fn create(&self, follow: Follow) -> StorageResult<Follow> {
        sqlx::query("INSERT INTO follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)")
            .bind(&follow.follower_id)
            .bind(&follow.followee_id)
            .bind(follow.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(follow)
    }

    async fn delete(&self, follower_id: &str, followee_id: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_followers(&self, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)> {
        self.list(Side::Followers, user_id, pagination).await
    }

    async fn list_following(&self, user_id: &str, pagination: &Pagination) -> StorageResult<(Vec<Follow>, u64)> {
        self.list(Side::Following, user_id, pagination).await
    }
}
