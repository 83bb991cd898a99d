//! Column decoding shared by the row mappers

use pz_core::errors::{StorageError, StorageResult};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use std::fmt::Display;
use uuid::Uuid;

use crate::database::error_mapping::map_sqlx_error;

pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> StorageResult<T>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(map_sqlx_error)
}

/// UUIDs are stored as CHAR(36)
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> StorageResult<Uuid> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| decode_error(name, e))
}

pub(crate) fn decode_error(name: &str, cause: impl Display) -> StorageError {
    StorageError::unknown("decode", format!("Invalid value in column '{name}': {cause}"))
}

/// `COUNT(*)` comes back as a signed BIGINT
pub(crate) fn count_column(row: &MySqlRow, name: &str) -> StorageResult<u64> {
    let count: i64 = column(row, name)?;
    Ok(count.max(0) as u64)
}
