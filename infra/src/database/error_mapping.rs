//! Translation of SQLx/MySQL failures into driver-independent `StorageError`s.

use once_cell::sync::Lazy;
use pz_core::errors::{StorageError, StorageErrorCode};
use regex::Regex;
use sqlx::mysql::MySqlDatabaseError;

/// MySQL server error numbers we classify
pub mod mysql_codes {
    pub const DUPLICATE_ENTRY: u16 = 1062;
    pub const ROW_IS_REFERENCED: u16 = 1451;
    pub const NO_REFERENCED_ROW: u16 = 1452;
    pub const OUT_OF_RANGE: u16 = 1264;
    pub const DATA_TOO_LONG: u16 = 1406;
    pub const NO_SUCH_TABLE: u16 = 1146;
    pub const BAD_FIELD: u16 = 1054;
}

/// Unique keys and the field reported to clients when they are violated
const UNIQUE_KEY_FIELDS: &[(&str, &str)] = &[
    ("uq_users_username", "username"),
    ("uq_users_email", "email"),
    ("uq_reactions_post_user", "reaction"),
    ("uq_flags_reporter_entity", "flag"),
    ("uq_device_tokens_token", "token"),
    ("follows.PRIMARY", "follow"),
];

static DUPLICATE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for key '([^']+)'").expect("valid duplicate key regex"));

static FOREIGN_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CONSTRAINT `([^`]+)` FOREIGN KEY \(`([^`]+)`\)").expect("valid foreign key regex")
});

static COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"column '([^']+)'").expect("valid column regex"));

static TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Table '([^']+)'").expect("valid table regex"));

/// Map any SQLx error into a `StorageError`
pub fn map_sqlx_error(error: sqlx::Error) -> StorageError {
    match error {
        sqlx::Error::RowNotFound => StorageError::record_not_found("Record not found"),
        sqlx::Error::PoolTimedOut => {
            StorageError::new(StorageErrorCode::PoolTimeout, "Timed out acquiring a database connection")
        }
        sqlx::Error::ColumnNotFound(column) => {
            StorageError::new(StorageErrorCode::ColumnMissing, format!("Column '{column}' not found"))
                .with_target([column])
        }
        sqlx::Error::Database(db_error) => match db_error.try_downcast_ref::<MySqlDatabaseError>() {
            Some(mysql) => map_mysql_error(mysql.number(), mysql.message()),
            None => StorageError::unknown(
                db_error.code().map(|c| c.into_owned()).unwrap_or_else(|| "database".to_string()),
                db_error.message(),
            ),
        },
        other => StorageError::unknown("sqlx", other.to_string()),
    }
}

/// Classify a MySQL server error by number, pulling the key or column out of the message
pub fn map_mysql_error(number: u16, message: &str) -> StorageError {
    use mysql_codes::*;

    match number {
        DUPLICATE_ENTRY => {
            let key = capture(&DUPLICATE_KEY, message, 1);
            let mut error = StorageError::new(StorageErrorCode::UniqueViolation, message);
            if let Some(key) = key {
                if let Some(field) = unique_key_field(key) {
                    error = error.with_target([field]);
                }
                error = error.with_constraint(key);
            }
            error
        }
        ROW_IS_REFERENCED | NO_REFERENCED_ROW => {
            let mut error = StorageError::new(StorageErrorCode::ForeignKeyViolation, message);
            if let Some(caps) = FOREIGN_KEY.captures(message) {
                error = error.with_target([caps[2].to_string()]).with_constraint(&caps[1]);
            }
            error
        }
        OUT_OF_RANGE | DATA_TOO_LONG => {
            with_optional_target(StorageError::new(StorageErrorCode::ValueOutOfRange, message), &COLUMN, message)
        }
        NO_SUCH_TABLE => {
            with_optional_target(StorageError::new(StorageErrorCode::TableMissing, message), &TABLE, message)
        }
        BAD_FIELD => {
            with_optional_target(StorageError::new(StorageErrorCode::ColumnMissing, message), &COLUMN, message)
        }
        other => StorageError::unknown(other.to_string(), message),
    }
}

/// Field for a unique key name; MySQL 8 prefixes the key with its table
fn unique_key_field(key: &str) -> Option<&'static str> {
    let bare = key.rsplit('.').next().unwrap_or(key);
    UNIQUE_KEY_FIELDS
        .iter()
        .find(|(name, _)| *name == key || *name == bare)
        .map(|(_, field)| *field)
}

fn capture<'a>(regex: &Regex, message: &'a str, group: usize) -> Option<&'a str> {
    regex.captures(message).and_then(|caps| caps.get(group)).map(|m| m.as_str())
}

fn with_optional_target(error: StorageError, regex: &Regex, message: &str) -> StorageError {
    match capture(regex, message, 1) {
        Some(name) => error.with_target([name]),
        None => error,
    }
}
