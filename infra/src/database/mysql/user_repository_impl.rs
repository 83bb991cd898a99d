//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use pz_core::domain::entities::user::User;
use pz_core::errors::{StorageError, StorageResult};
use pz_core::repositories::UserRepository;

use super::rows::column;
use crate::database::error_mapping::map_sqlx_error;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> StorageResult<User> {
        Ok(User {
            id: column(row, "id")?,
            username: column(row, "username")?,
            email: column(row, "email")?,
            display_name: column(row, "display_name")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<User>> {
        let query = r#"
            SELECT id, username, email, display_name, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> StorageResult<User> {
        let query = r#"
            INSERT INTO users (id, username, email, display_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn update(&self, user: User) -> StorageResult<User> {
        let query = r#"
            UPDATE users
            SET username = ?, email = ?, display_name = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(user.updated_at)
            .bind(&user.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        // Unchanged rows count as 0 affected
        if result.rows_affected() == 0 && !self.exists(&user.id).await? {
            return Err(StorageError::record_not_found(format!("User {} does not exist", user.id)));
        }

        Ok(user)
    }

    async fn exists(&self, id: &str) -> StorageResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(exists == 1)
    }
}
