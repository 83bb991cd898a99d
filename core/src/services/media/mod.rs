//! Media upload service module

#[cfg(any(test, feature = "mocks"))]
pub mod mock;
mod service;

pub use service::{MediaHost, MediaService};
