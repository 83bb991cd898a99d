use pz_core::domain::entities::ProfileUpdate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 64))]
    pub username: Option<String>,

    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[validate(length(max = 200))]
    pub display_name: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            username: request.username,
            email: request.email,
            display_name: request.display_name,
        }
    }
}
