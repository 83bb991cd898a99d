//! Tests for the reaction service

#[cfg(test)]
mod service_tests;
