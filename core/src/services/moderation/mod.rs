//! Moderation service module

mod service;

#[cfg(test)]
mod tests;

pub use service::{ModerationService, ReportTargets, REASON_BOUNDS};
