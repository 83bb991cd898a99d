//! Device token service module

mod service;

pub use service::{DeviceTokenService, RegisterOutcome, MAX_TOKEN_LENGTH};
