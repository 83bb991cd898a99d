//! Dependency health checks

mod service;

pub use service::{HealthProbe, HealthService, PROBE_TIMEOUT};
