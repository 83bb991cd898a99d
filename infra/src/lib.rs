//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `pz_core`:
//! - **Database**: MySQL repositories using SQLx
//! - **Media**: Cloudinary client implementing `MediaHost`
//! - **Health**: probes for the database and the media host
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Media host clients
pub mod media;

/// Health probes for external dependencies
pub mod health;

/// Infrastructure-specific error types, raised while wiring up adapters
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
