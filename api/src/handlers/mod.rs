//! Building blocks shared by every route handler
//!
//! - `boundary` - panic-safe wrapper that classifies handler failures
//! - `response` - success envelope helpers

pub mod boundary;
pub mod response;

pub use boundary::{guard, validated};
pub use response::{created, ok, paginated, respond};
