//! Storage layer failures, reported by repositories independent of the database driver.

use std::fmt;
use thiserror::Error;

/// Machine-readable storage failure category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorCode {
    UniqueViolation,
    ForeignKeyViolation,
    RecordNotFound,
    ValueOutOfRange,
    TableMissing,
    ColumnMissing,
    PoolTimeout,
    /// Driver specific code with no dedicated category
    Unknown(String),
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageErrorCode::UniqueViolation => f.write_str("unique_violation"),
            StorageErrorCode::ForeignKeyViolation => f.write_str("foreign_key_violation"),
            StorageErrorCode::RecordNotFound => f.write_str("record_not_found"),
            StorageErrorCode::ValueOutOfRange => f.write_str("value_out_of_range"),
            StorageErrorCode::TableMissing => f.write_str("table_missing"),
            StorageErrorCode::ColumnMissing => f.write_str("column_missing"),
            StorageErrorCode::PoolTimeout => f.write_str("pool_timeout"),
            StorageErrorCode::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// Coded storage failure with the metadata the error transformer needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage error [{code}]: {message}")]
pub struct StorageError {
    pub code: StorageErrorCode,
    pub message: String,
    /// Columns involved in the failure, first one reported to clients
    pub target: Vec<String>,
    /// Constraint or key name as reported by the database
    pub constraint: Option<String>,
}

impl StorageError {
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            target: Vec::new(),
            constraint: None,
        }
    }

    pub fn unique_violation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(StorageErrorCode::UniqueViolation, "Unique constraint failed").with_target(fields)
    }

    pub fn foreign_key_violation(field: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::ForeignKeyViolation, "Foreign key constraint failed")
            .with_target([field])
    }

    pub fn record_not_found(message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::RecordNotFound, message)
    }

    pub fn unknown(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::Unknown(code.into()), message)
    }

    pub fn with_target<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// First target column, `"value"` when the driver did not say
    pub fn field(&self) -> &str {
        self.target.first().map(String::as_str).unwrap_or("value")
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code == StorageErrorCode::UniqueViolation
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
