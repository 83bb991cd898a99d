//! Follow service module

mod service;

pub use service::FollowService;
