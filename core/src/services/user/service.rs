//! User profile reads and updates

use pz_shared::validation::{require_email, require_string_length, require_username, sanitize_html, LengthBounds};
use std::sync::Arc;

use crate::domain::entities::user::{ProfileUpdate, User};
use crate::errors::{ApiError, ApiResult};
use crate::repositories::UserRepository;

pub const DISPLAY_NAME_BOUNDS: LengthBounds = LengthBounds::new(1, 50);

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get(&self, user_id: &str) -> ApiResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))
    }

    /// Apply a partial update; unique username and email are enforced by storage
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> ApiResult<User> {
        if update.is_empty() {
            return Err(ApiError::validation("No profile fields to update"));
        }

        let mut user = self.get(user_id).await?;

        if let Some(username) = update.username {
            let username = username.trim();
            require_username(username)?;
            user.username = username.to_string();
        }

        if let Some(email) = update.email {
            let email = email.trim().to_lowercase();
            require_email(&email)?;
            user.email = email;
        }

        if let Some(display_name) = update.display_name {
            let display_name = sanitize_html(&display_name);
            require_string_length(&display_name, "Display name", DISPLAY_NAME_BOUNDS)?;
            user.display_name = Some(display_name);
        }

        user.touch();
        let user = self.users.update(user).await?;
        tracing::debug!(user_id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::repositories::mock::MockUserRepository;

    async fn setup() -> UserService {
        let repo = Arc::new(MockUserRepository::new());
        repo.seed([
            User::new("user_a", "ada", "ada@example.com"),
            User::new("user_b", "grace", "grace@example.com"),
        ])
        .await;
        UserService::new(repo)
    }

    #[tokio::test]
    async fn test_update_profile_normalizes_fields() {
        let service = setup().await;
        let update = ProfileUpdate {
            username: Some(" ada_l ".into()),
            email: Some("Ada@Example.COM".into()),
            display_name: Some("Ada <script>x()</script>Lovelace".into()),
        };

        let user = service.update_profile("user_a", update).await.unwrap();
        assert_eq!(user.username, "ada_l");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_profile_duplicate_username_conflicts() {
        let service = setup().await;
        let update = ProfileUpdate {
            username: Some("grace".into()),
            ..Default::default()
        };

        let err = service.update_profile("user_a", update).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "username already exists");
    }

    #[tokio::test]
    async fn test_update_profile_rejects_bad_input() {
        let service = setup().await;

        let err = service.update_profile("user_a", ProfileUpdate::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let update = ProfileUpdate {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let err = service.update_profile("user_a", update).await.unwrap_err();
        assert_eq!(err.message(), "Invalid email format");

        let update = ProfileUpdate {
            display_name: Some("<script>x()</script>".into()),
            ..Default::default()
        };
        let err = service.update_profile("user_a", update).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = setup().await;
        let err = service.get("ghost").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "User not found");
    }
}
