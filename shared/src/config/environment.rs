//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Check if running in staging
    pub fn is_staging(&self) -> bool {
        matches!(self, Environment::Staging)
    }

    /// Error bodies carry causes and non-operational messages only in development
    pub fn exposes_error_details(&self) -> bool {
        self.is_development()
    }

    /// Get environment from ENV variable
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .or_else(|_| env::var("RUST_ENV"))
            .unwrap_or_else(|_| String::from("development"))
            .parse()
            .unwrap_or(Environment::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error); `RUST_LOG` still wins
    pub level: String,

    /// Write timestamps on every line
    #[serde(default = "default_timestamp")]
    pub timestamp: bool,

    /// Colored output (terminal only)
    #[serde(default)]
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            timestamp: default_timestamp(),
            colored: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config for environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                timestamp: true,
                colored: true,
            },
            Environment::Staging | Environment::Production => Self {
                level: String::from("info"),
                timestamp: true,
                colored: false,
            },
        }
    }

    pub fn from_env(environment: Environment) -> Self {
        let mut config = Self::for_environment(environment);
        if let Ok(level) = env::var("LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.level = level.trim().to_lowercase();
            }
        }
        config
    }
}

fn default_timestamp() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("invalid".parse::<Environment>().is_err());
    }

    #[test]
    fn test_only_development_exposes_details() {
        assert!(Environment::Development.exposes_error_details());
        assert!(!Environment::Staging.exposes_error_details());
        assert!(!Environment::Production.exposes_error_details());
    }

    #[test]
    fn test_logging_config_for_environment() {
        let dev_log = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev_log.level, "debug");
        assert!(dev_log.colored);

        let prod_log = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod_log.level, "info");
        assert!(!prod_log.colored);
    }
}
