//! Type definitions shared by every layer
//!
//! - `pagination` - Pagination parameters and metadata for list endpoints
//! - `response` - API response envelope and health checks

pub mod pagination;
pub mod response;

pub use pagination::{Page, PageQuery, Pagination, PaginationMeta};
pub use response::{
    ApiResponse, Disclosure, ErrorBody, HealthReport, HealthStatus, ServiceHealth,
};
