//! Repository interfaces, one per aggregate.
//!
//! Every method reports failures as [`StorageError`](crate::errors::StorageError)
//! so services can translate them with `?`.

pub mod chat;
pub mod content;
pub mod device_token;
pub mod follow;
pub mod moderation;
pub mod reaction;
pub mod user;

pub use chat::{ChatRepository, MessageRepository};
pub use content::{CommentRepository, PostRepository};
pub use device_token::DeviceTokenRepository;
pub use follow::FollowRepository;
pub use moderation::ModerationRepository;
pub use reaction::ReactionRepository;
pub use user::UserRepository;

/// In-memory implementations for tests
#[cfg(any(test, feature = "mocks"))]
pub mod mock {
    pub use super::chat::{MockChatRepository, MockMessageRepository};
    pub use super::content::{MockCommentRepository, MockPostRepository};
    pub use super::device_token::MockDeviceTokenRepository;
    pub use super::follow::MockFollowRepository;
    pub use super::moderation::MockModerationRepository;
    pub use super::reaction::MockReactionRepository;
    pub use super::user::MockUserRepository;
}
