//! Push notification token registration
//!
//! A token identifies a physical device, so registering a token another
//! user holds moves it to the caller instead of failing.

use chrono::Utc;
use pz_shared::validation::{require_string_length, LengthBounds};
use std::sync::Arc;

use crate::domain::entities::device_token::{DevicePlatform, DeviceToken};
use crate::errors::{ApiError, ApiResult};
use crate::repositories::DeviceTokenRepository;

pub const MAX_TOKEN_LENGTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First time this token was seen
    Registered(DeviceToken),
    /// The caller already owned the token; platform and timestamp refreshed
    Refreshed(DeviceToken),
    /// The token moved from another user to the caller
    Rebound {
        device: DeviceToken,
        previous_user_id: String,
    },
}

impl RegisterOutcome {
    pub fn device(&self) -> &DeviceToken {
        match self {
            RegisterOutcome::Registered(device) | RegisterOutcome::Refreshed(device) => device,
            RegisterOutcome::Rebound { device, .. } => device,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, RegisterOutcome::Registered(_))
    }
}

pub struct DeviceTokenService {
    tokens: Arc<dyn DeviceTokenRepository>,
}

impl DeviceTokenService {
    pub fn new(tokens: Arc<dyn DeviceTokenRepository>) -> Self {
        Self { tokens }
    }

    pub async fn register(&self, user_id: &str, token: &str, platform: DevicePlatform) -> ApiResult<RegisterOutcome> {
        let token = token.trim();
        require_string_length(token, "Device token", LengthBounds::new(1, MAX_TOKEN_LENGTH))?;

        if let Some(existing) = self.tokens.find_by_token(token).await? {
            return self.rebind(existing, user_id, platform).await;
        }

        match self.tokens.create(DeviceToken::new(token, user_id, platform)).await {
            Ok(device) => {
                tracing::info!(user_id, platform = platform.as_str(), "device token registered");
                Ok(RegisterOutcome::Registered(device))
            }
            // Lost a race with a concurrent insert of the same token
            Err(err) if err.is_unique_violation() => {
                let existing = self
                    .tokens
                    .find_by_token(token)
                    .await?
                    .ok_or_else(|| ApiError::from(err))?;
                self.rebind(existing, user_id, platform).await
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn unregister(&self, user_id: &str, token: &str) -> ApiResult<()> {
        let existing = self
            .tokens
            .find_by_token(token.trim())
            .await?
            .ok_or_else(|| ApiError::not_found("Device token"))?;

        if existing.user_id != user_id {
            return Err(ApiError::authorization("Device token belongs to another user"));
        }

        self.tokens.delete(&existing.token).await?;
        Ok(())
    }

    async fn rebind(&self, mut existing: DeviceToken, user_id: &str, platform: DevicePlatform) -> ApiResult<RegisterOutcome> {
        let previous_user_id = std::mem::replace(&mut existing.user_id, user_id.to_string());
        existing.platform = platform;
        existing.updated_at = Utc::now();

        let device = self.tokens.update(existing).await?;
        if previous_user_id == user_id {
            Ok(RegisterOutcome::Refreshed(device))
        } else {
            tracing::info!(user_id, previous_user_id = %previous_user_id, "device token rebound");
            Ok(RegisterOutcome::Rebound {
                device,
                previous_user_id,
            })
        }
    }
}
