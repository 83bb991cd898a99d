//! Request and response bodies for the HTTP surface

pub mod device;
pub mod media;
pub mod message;
pub mod moderation;
pub mod reaction;
pub mod user;

pub use device::RegisterDeviceRequest;
pub use media::UploadQuery;
pub use message::{MarkAllReadResponse, SendMessageRequest};
pub use moderation::{FlagFilterQuery, ReportRequest, UpdateFlagRequest};
pub use reaction::{ReactionRequest, RemovedReaction, UpdatedReaction};
pub use user::UpdateProfileRequest;
