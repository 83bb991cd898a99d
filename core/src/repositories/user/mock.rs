//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::{StorageError, StorageResult};

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed users without going through uniqueness checks
    pub async fn seed(&self, users: impl IntoIterator<Item = User>) {
        let mut store = self.users.write().await;
        for user in users {
            store.insert(user.id.clone(), user);
        }
    }

    fn check_unique(users: &HashMap<String, User>, candidate: &User) -> StorageResult<()> {
        for other in users.values().filter(|u| u.id != candidate.id) {
            if other.username.eq_ignore_ascii_case(&candidate.username) {
                return Err(StorageError::unique_violation(["username"])
                    .with_constraint("uq_users_username"));
            }
            if other.email.eq_ignore_ascii_case(&candidate.email) {
                return Err(StorageError::unique_violation(["email"]).with_constraint("uq_users_email"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn create(&self, user: User) -> StorageResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StorageError::unique_violation(["id"]).with_constraint("PRIMARY"));
        }
        Self::check_unique(&users, &user)?;

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> StorageResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StorageError::record_not_found("User to update does not exist"));
        }
        Self::check_unique(&users, &user)?;

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}
