//! # Plaza Core
//!
//! Core business logic and domain layer for the Plaza backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and the error classification that turns any failure into an `ApiError`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::*;
pub use errors::{
    classify, ApiError, ApiResult, ErrorKind, IdentityError, MediaHostError, StorageError, StorageErrorCode,
    StorageResult,
};
pub use repositories::{
    ChatRepository, CommentRepository, DeviceTokenRepository, FollowRepository, MessageRepository,
    ModerationRepository, PostRepository, ReactionRepository, UserRepository,
};
pub use services::{
    DeviceTokenService, FollowService, HealthProbe, HealthService, MediaHost, MediaService, MessageService,
    ModerationService, RegisterOutcome, ReactionService, ReportTargets, ToggleOutcome, UserService,
};
