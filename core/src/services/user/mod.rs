//! User profile service module

mod service;

pub use service::{UserService, DISPLAY_NAME_BOUNDS};
