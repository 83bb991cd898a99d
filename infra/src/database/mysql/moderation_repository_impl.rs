//! MySQL implementation of the ModerationRepository trait.

use async_trait::async_trait;
use pz_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use pz_core::domain::entities::moderation::{FlagStatus, FlaggedEntityType, ModerationFlag};
use pz_core::errors::{StorageError, StorageResult};
use pz_core::repositories::ModerationRepository;

use super::rows::{column, count_column, decode_error, uuid_column};
use crate::database::error_mapping::map_sqlx_error;

const FLAG_COLUMNS: &str =
    "id, entity_type, entity_id, reporter_id, reason, status, reviewed_by, created_at, updated_at";

pub struct MySqlModerationRepository {
    pool: MySqlPool,
}

impl MySqlModerationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_flag(row: &MySqlRow) -> StorageResult<ModerationFlag> {
        let entity_type: String = column(row, "entity_type")?;
        let status: String = column(row, "status")?;

        Ok(ModerationFlag {
            id: uuid_column(row, "id")?,
            entity_type: FlaggedEntityType::parse(&entity_type).map_err(|e| decode_error("entity_type", e))?,
            entity_id: column(row, "entity_id")?,
            reporter_id: column(row, "reporter_id")?,
            reason: column(row, "reason")?,
            status: FlagStatus::parse(&status).map_err(|e| decode_error("status", e))?,
            reviewed_by: column(row, "reviewed_by")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ModerationRepository for MySqlModerationRepository {
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<ModerationFlag>> {
        let query = format!("SELECT {FLAG_COLUMNS} FROM moderation_flags WHERE id = ? LIMIT 1");
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_flag).transpose()
    }

    async fn find_by_reporter(
        &self,
        reporter_id: &str,
        entity_type: FlaggedEntityType,
        entity_id: &str,
    ) -> StorageResult<Option<ModerationFlag>> {
        let query = format!(
            "SELECT {FLAG_COLUMNS} FROM moderation_flags \
             WHERE reporter_id = ? AND entity_type = ? AND entity_id = ? LIMIT 1"
        );
        let result = sqlx::query(&query)
            .bind(reporter_id)
            .bind(entity_type.as_str())
            .bind(entity_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_flag).transpose()
    }

    async fn create(&self, flag: ModerationFlag) -> StorageResult<ModerationFlag> {
        let query = format!("INSERT INTO moderation_flags ({FLAG_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)");
        sqlx::query(&query)
            .bind(flag.id.to_string())
            .bind(flag.entity_type.as_str())
            .bind(&flag.entity_id)
            .bind(&flag.reporter_id)
            .bind(&flag.reason)
            .bind(flag.status.as_str())
            .bind(&flag.reviewed_by)
            .bind(flag.created_at)
            .bind(flag.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(flag)
    }

    async fn update(&self, flag: ModerationFlag) -> StorageResult<ModerationFlag> {
        let result = sqlx::query("UPDATE moderation_flags SET status = ?, reviewed_by = ?, updated_at = ? WHERE id = ?")
            .bind(flag.status.as_str())
            .bind(&flag.reviewed_by)
            .bind(flag.updated_at)
            .bind(flag.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 && self.find_by_id(flag.id).await?.is_none() {
            return Err(StorageError::record_not_found(format!("Flag {} does not exist", flag.id)));
        }

        Ok(flag)
    }

    async fn list(&self, status: Option<FlagStatus>, pagination: &Pagination) -> StorageResult<(Vec<ModerationFlag>, u64)> {
        let filter = if status.is_some() { "WHERE status = ?" } else { "" };

        let total_query = format!("SELECT COUNT(*) AS total FROM moderation_flags {filter}");
        let mut total_stmt = sqlx::query(&total_query);
        if let Some(status) = status {
            total_stmt = total_stmt.bind(status.as_str());
        }
        let total_row = total_stmt.fetch_one(&self.pool).await.map_err(map_sqlx_error)?;
        let total = count_column(&total_row, "total")?;

        let page_query =
            format!("SELECT {FLAG_COLUMNS} FROM moderation_flags {filter} ORDER BY created_at ASC LIMIT ? OFFSET ?");
        let mut page_stmt = sqlx::query(&page_query);
        if let Some(status) = status {
            page_stmt = page_stmt.bind(status.as_str());
        }
        let rows = page_stmt
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let flags = rows.iter().map(Self::row_to_flag).collect::<StorageResult<Vec<_>>>()?;
        Ok((flags, total))
    }
}
