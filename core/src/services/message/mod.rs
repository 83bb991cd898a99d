//! Chat message service module

mod service;

#[cfg(test)]
mod tests;

pub use service::{MessageService, MAX_MESSAGE_LENGTH};
