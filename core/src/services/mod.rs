//! Business services containing domain logic and use cases.

pub mod device_token;
pub mod follow;
pub mod health;
pub mod media;
pub mod message;
pub mod moderation;
pub mod reaction;
pub mod user;

// Re-export commonly used types
pub use device_token::{DeviceTokenService, RegisterOutcome};
pub use follow::FollowService;
pub use health::{HealthProbe, HealthService};
pub use media::{MediaHost, MediaService};
pub use message::MessageService;
pub use moderation::{ModerationService, ReportTargets};
pub use reaction::{ReactionService, ToggleOutcome};
pub use user::UserService;
