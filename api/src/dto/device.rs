use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDeviceRequest {
    /// Push token issued by APNs, FCM or the browser
    #[validate(length(min = 1, max = 512))]
    pub token: String,

    /// IOS, ANDROID or WEB
    #[validate(length(min = 1, max = 16))]
    pub platform: String,
}
