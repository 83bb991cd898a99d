//! MySQL implementation of the ReactionRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use pz_core::domain::entities::reaction::{Reaction, ReactionType};
use pz_core::errors::StorageResult;
use pz_core::repositories::ReactionRepository;

use super::rows::{column, count_column, decode_error, uuid_column};
use crate::database::error_mapping::map_sqlx_error;

const INSERT_REACTION: &str = r#"
    INSERT INTO reactions (id, post_id, user_id, type, created_at)
    VALUES (?, ?, ?, ?, ?)
"#;

pub struct MySqlReactionRepository {
    pool: MySqlPool,
}

impl MySqlReactionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn reaction_type(row: &MySqlRow) -> StorageResult<ReactionType> {
        let raw: String = column(row, "type")?;
        ReactionType::parse(&raw).map_err(|e| decode_error("type", e))
    }

    fn row_to_reaction(row: &MySqlRow) -> StorageResult<Reaction> {
        Ok(Reaction {
            id: uuid_column(row, "id")?,
            post_id: uuid_column(row, "post_id")?,
            user_id: column(row, "user_id")?,
            reaction_type: Self::reaction_type(row)?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl ReactionRepository for MySqlReactionRepository {
    async fn find_by_post_and_user(&self, post_id: Uuid, user_id: &str) -> StorageResult<Option<Reaction>> {
        let query = r#"
            SELECT id, post_id, user_id, type, created_at
            FROM reactions
            WHERE post_id = ? AND user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(post_id.to_string())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_reaction).transpose()
    }

    async fn create(&self, reaction: Reaction) -> StorageResult<Reaction> {
        sqlx::query(INSERT_REACTION)
            .bind(reaction.id.to_string())
            .bind(reaction.post_id.to_string())
            .bind(&reaction.user_id)
            .bind(reaction.reaction_type.as_str())
            .bind(reaction.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(reaction)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM reactions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace(&self, existing_id: Uuid, replacement: Reaction) -> StorageResult<Reaction> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM reactions WHERE id = ?")
            .bind(existing_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query(INSERT_REACTION)
            .bind(replacement.id.to_string())
            .bind(replacement.post_id.to_string())
            .bind(&replacement.user_id)
            .bind(replacement.reaction_type.as_str())
            .bind(replacement.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(replacement)
    }

    async fn count_by_type(&self, post_id: Uuid) -> StorageResult<Vec<(ReactionType, u64)>> {
        let query = r#"
            SELECT type, COUNT(*) AS total
            FROM reactions
            WHERE post_id = ?
            GROUP BY type
        "#;

        let rows = sqlx::query(query)
            .bind(post_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| Ok((Self::reaction_type(row)?, count_column(row, "total")?)))
            .collect()
    }
}
