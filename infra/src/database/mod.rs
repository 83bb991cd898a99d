//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Translation of driver errors into `StorageError`
//! - One repository implementation per core repository trait

pub mod connection;
pub mod error_mapping;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use error_mapping::map_sqlx_error;
pub use mysql::{
    MySqlChatRepository, MySqlCommentRepository, MySqlDeviceTokenRepository, MySqlFollowRepository,
    MySqlMessageRepository, MySqlModerationRepository, MySqlPostRepository, MySqlReactionRepository,
    MySqlUserRepository,
};
