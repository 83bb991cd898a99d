//! User entity mirrored from the identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user; `id` is the identity provider's opaque user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            display_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown in the UI, falling back to the username
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.display_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = User::new("user_1", "ada", "ada@example.com");
        assert_eq!(user.display_name(), "ada");

        user.display_name = Some("Ada Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_serializes_camel_case() {
        let user = User::new("user_1", "ada", "ada@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("displayName").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
