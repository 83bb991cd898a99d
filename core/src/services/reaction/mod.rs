//! Reaction service module

mod service;

#[cfg(test)]
mod tests;

pub use service::{ReactionService, ToggleOutcome};
