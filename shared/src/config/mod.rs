//! Configuration module with business-specific sub-modules
//!
//! - `database` - MySQL connection pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `identity` - Clerk session token verification
//! - `media` - Cloudinary credentials
//! - `moderation` - Moderator allow-list
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod environment;
pub mod identity;
pub mod media;
pub mod moderation;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use identity::IdentityConfig;
pub use media::MediaConfig;
pub use moderation::ModerationConfig;
pub use server::{CorsConfig, ServerConfig};

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cors: CorsConfig::from_env(environment),
            logging: LoggingConfig::from_env(environment),
            identity: IdentityConfig::from_env(),
            media: MediaConfig::from_env(),
            moderation: ModerationConfig::from_env(),
        }
    }

    /// Reject configurations that cannot serve traffic outside development
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                key: "SERVER_PORT",
                reason: "port must be non-zero".to_string(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: "pool needs at least one connection".to_string(),
            });
        }
        if self.environment.is_production() {
            if !self.database.is_configured() {
                return Err(ConfigError::Missing("DATABASE_URL"));
            }
            if !self.identity.is_configured() {
                return Err(ConfigError::Missing("CLERK_JWT_KEY"));
            }
            if self.cors.allows_any_origin() {
                return Err(ConfigError::Invalid {
                    key: "ALLOWED_ORIGINS",
                    reason: "wildcard origin is not allowed in production".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Non-blank environment variable
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Comma separated environment variable
pub(crate) fn env_list(key: &str) -> Vec<String> {
    env::var(key)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> AppConfig {
        AppConfig {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://db:3306/plaza"),
            identity: IdentityConfig::default().with_public_key("-----BEGIN PUBLIC KEY-----"),
            cors: CorsConfig {
                allowed_origins: vec!["https://plaza.example".to_string()],
                ..CorsConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_development_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_config_is_valid() {
        assert!(production().validate().is_ok());
    }

    #[test]
    fn test_production_requires_database_url() {
        let config = AppConfig {
            database: DatabaseConfig::default(),
            ..production()
        };
        assert_eq!(config.validate(), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_production_requires_clerk_key() {
        let config = AppConfig {
            identity: IdentityConfig::default(),
            ..production()
        };
        assert_eq!(config.validate(), Err(ConfigError::Missing("CLERK_JWT_KEY")));
    }

    #[test]
    fn test_production_rejects_wildcard_origin() {
        let config = AppConfig {
            cors: CorsConfig::development(),
            ..production()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "ALLOWED_ORIGINS", .. })
        ));
    }
}
