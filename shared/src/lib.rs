//! Shared utilities and common types for the Plaza server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The error taxonomy and response envelope
//! - Validation utilities
//! - Pagination types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, IdentityConfig,
    LoggingConfig, MediaConfig, ModerationConfig, ServerConfig,
};
pub use errors::{error_codes, ApiError, ApiResult, ErrorKind, GENERIC_ERROR_MESSAGE};
pub use types::{
    ApiResponse, Disclosure, ErrorBody, HealthReport, HealthStatus, Page, PageQuery, Pagination,
    PaginationMeta, ServiceHealth,
};
pub use utils::validation;
