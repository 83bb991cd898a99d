pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

#[cfg(any(test, feature = "mocks"))]
mod mock;

#[cfg(test)]
mod tests;

pub use r#trait::{ChatRepository, MessageRepository};

#[cfg(any(test, feature = "mocks"))]
pub use mock::{MockChatRepository, MockMessageRepository};
