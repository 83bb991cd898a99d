//! Tests for the moderation service

#[cfg(test)]
mod service_tests;
