//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::StorageResult;

/// Repository trait for User entity persistence operations
///
/// Username and email are unique; violating either is reported as a
/// `UniqueViolation` whose target names the column.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their identity provider id
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: User) -> StorageResult<User>;

    /// Update an existing user; `RecordNotFound` when it does not exist
    async fn update(&self, user: User) -> StorageResult<User>;

    /// Check whether a user exists
    async fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
