//! Cloudinary media hosting settings

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_secret: Option<String>,
    /// Upload API base URL
    pub api_base_url: String,
    /// Folder prefix for uploaded assets
    pub folder: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            api_base_url: String::from("https://api.cloudinary.com"),
            folder: String::from("plaza"),
            timeout: 60,
        }
    }
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cloud_name: env_opt("CLOUDINARY_CLOUD_NAME"),
            api_key: env_opt("CLOUDINARY_API_KEY"),
            api_secret: env_opt("CLOUDINARY_API_SECRET"),
            api_base_url: env_or("CLOUDINARY_API_BASE_URL", defaults.api_base_url),
            folder: env_or("CLOUDINARY_FOLDER", defaults.folder),
            timeout: defaults.timeout,
        }
    }

    /// All three credentials present
    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.api_key.is_some() && self.api_secret.is_some()
    }
}
