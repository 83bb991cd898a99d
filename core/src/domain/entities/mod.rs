//! Domain entities representing core business objects.

pub mod chat;
pub mod device_token;
pub mod follow;
pub mod media;
pub mod moderation;
pub mod post;
pub mod reaction;
pub mod user;

// Re-export commonly used types
pub use chat::{Chat, DeliveryOutcome, Message};
pub use device_token::{DevicePlatform, DeviceToken};
pub use follow::Follow;
pub use media::{MediaAsset, UploadProfile};
pub use moderation::{FlagStatus, FlaggedEntityType, ModerationFlag};
pub use post::{Comment, Post};
pub use reaction::{Reaction, ReactionSummary, ReactionType};
pub use user::{ProfileUpdate, User};
