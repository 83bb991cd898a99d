//! MySQL implementations of the core repository traits

mod rows;

mod chat_repository_impl;
mod content_repository_impl;
mod device_token_repository_impl;
mod follow_repository_impl;
mod moderation_repository_impl;
mod reaction_repository_impl;
mod user_repository_impl;

pub use chat_repository_impl::{MySqlChatRepository, MySqlMessageRepository};
pub use content_repository_impl::{MySqlCommentRepository, MySqlPostRepository};
pub use device_token_repository_impl::MySqlDeviceTokenRepository;
pub use follow_repository_impl::MySqlFollowRepository;
pub use moderation_repository_impl::MySqlModerationRepository;
pub use reaction_repository_impl::MySqlReactionRepository;
pub use user_repository_impl::MySqlUserRepository;
