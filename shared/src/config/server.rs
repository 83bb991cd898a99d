//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_list, env_or};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum JSON payload size in bytes
    #[serde(default = "default_max_json_payload")]
    pub max_json_payload: usize,

    /// Maximum raw upload size in bytes
    #[serde(default = "default_max_upload_payload")]
    pub max_upload_payload: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            max_json_payload: default_max_json_payload(),
            max_upload_payload: default_max_upload_payload(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("SERVER_HOST", defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
            ..defaults
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allow credentials
    #[serde(default)]
    pub allow_credentials: bool,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allow_credentials: true,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Create a permissive CORS configuration for development
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
            max_age: 3600,
        }
    }

    pub fn from_env(environment: super::Environment) -> Self {
        let base = if environment.is_development() {
            Self::development()
        } else {
            Self::default()
        };
        let origins = env_list("ALLOWED_ORIGINS");

        Self {
            allowed_origins: if origins.is_empty() { base.allowed_origins } else { origins },
            max_age: env_or("CORS_MAX_AGE", base.max_age),
            ..base
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn default_max_json_payload() -> usize {
    256 * 1024
}

fn default_max_upload_payload() -> usize {
    100 * 1024 * 1024
}

fn default_max_age() -> usize {
    86400
}
