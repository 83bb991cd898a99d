//! Database configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL; empty when not configured
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before giving up
    pub acquire_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            acquire_timeout: 5,
            idle_timeout: 600,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_or("DATABASE_URL", defaults.url),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            acquire_timeout: env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout),
            idle_timeout: defaults.idle_timeout,
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
