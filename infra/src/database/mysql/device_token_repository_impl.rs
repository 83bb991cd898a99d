//! MySQL implementation of the DeviceTokenRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use pz_core::domain::entities::device_token::{DevicePlatform, DeviceToken};
use pz_core::errors::{StorageError, StorageResult};
use pz_core::repositories::DeviceTokenRepository;

use super::rows::{column, decode_error};
use crate::database::error_mapping::map_sqlx_error;

pub struct MySqlDeviceTokenRepository {
    pool: MySqlPool,
}

impl MySqlDeviceTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_device(row: &MySqlRow) -> StorageResult<DeviceToken> {
        let platform: String = column(row, "platform")?;
        Ok(DeviceToken {
            token: column(row, "token")?,
            user_id: column(row, "user_id")?,
            platform: DevicePlatform::parse(&platform).map_err(|e| decode_error("platform", e))?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl DeviceTokenRepository for MySqlDeviceTokenRepository {
    async fn find_by_token(&self, token: &str) -> StorageResult<Option<DeviceToken>> {
        let query = r#"
            SELECT token, user_id, platform, created_at, updated_at
            FROM device_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        result.as_ref().map(Self::row_to_device).transpose()
    }

    async fn create(&self, device: DeviceToken) -> StorageResult<DeviceToken> {
        let query = r#"
            INSERT INTO device_tokens (token, user_id, platform, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&device.token)
            .bind(&device.user_id)
            .bind(device.platform.as_str())
            .bind(device.created_at)
            .bind(device.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(device)
    }

    async fn update(&self, device: DeviceToken) -> StorageResult<DeviceToken> {
        let result = sqlx::query("UPDATE device_tokens SET user_id = ?, platform = ?, updated_at = ? WHERE token = ?")
            .bind(&device.user_id)
            .bind(device.platform.as_str())
            .bind(device.updated_at)
            .bind(&device.token)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 && self.find_by_token(&device.token).await?.is_none() {
            return Err(StorageError::record_not_found("Device token does not exist"));
        }

        Ok(device)
    }

    async fn delete(&self, token: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM device_tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
