//! Reporting content and reviewing moderation flags

use pz_shared::config::ModerationConfig;
use pz_shared::types::{Page, Pagination};
use pz_shared::validation::{require_string_length, sanitize_html, LengthBounds};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::moderation::{FlagStatus, FlaggedEntityType, ModerationFlag};
use crate::errors::{ApiError, ApiResult};
use crate::repositories::{
    CommentRepository, MessageRepository, ModerationRepository, PostRepository, UserRepository,
};

pub const REASON_BOUNDS: LengthBounds = LengthBounds::new(3, 500);

/// Repositories used to resolve the target of a report
pub struct ReportTargets {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

pub struct ModerationService {
    flags: Arc<dyn ModerationRepository>,
    targets: ReportTargets,
    config: ModerationConfig,
}

impl ModerationService {
    pub fn new(flags: Arc<dyn ModerationRepository>, targets: ReportTargets, config: ModerationConfig) -> Self {
        Self { flags, targets, config }
    }

    /// File a PENDING flag against a post, comment, user or message
    ///
    /// A reporter may flag a given entity once, whatever happened to the
    /// earlier flag.
    pub async fn report(
        &self,
        entity_type: &str,
        entity_id: &str,
        reporter_id: &str,
        reason: &str,
    ) -> ApiResult<ModerationFlag> {
        let entity_type = FlaggedEntityType::parse(entity_type)?;
        let reason = sanitize_html(reason);
        require_string_length(&reason, "Reason", REASON_BOUNDS)?;

        let owner = self.target_owner(entity_type, entity_id).await?;
        if owner == reporter_id {
            return Err(ApiError::validation("You cannot report your own content"));
        }

        if self
            .flags
            .find_by_reporter(reporter_id, entity_type, entity_id)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict("You have already reported this content"));
        }

        let flag = self
            .flags
            .create(ModerationFlag::new(entity_type, entity_id, reporter_id, reason))
            .await?;
        tracing::info!(flag_id = %flag.id, %entity_type, entity_id, "content reported");
        Ok(flag)
    }

    /// Any status may move to any other; the reviewer is recorded
    pub async fn update_status(&self, flag_id: Uuid, status: FlagStatus, moderator_id: &str) -> ApiResult<ModerationFlag> {
        self.require_moderator(moderator_id)?;

        let mut flag = self
            .flags
            .find_by_id(flag_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Flag"))?;

        let previous = flag.status;
        flag.review(status, moderator_id);
        let flag = self.flags.update(flag).await?;

        tracing::info!(%flag_id, %previous, status = %flag.status, moderator_id, "flag reviewed");
        Ok(flag)
    }

    pub async fn list(
        &self,
        status: Option<FlagStatus>,
        pagination: &Pagination,
        moderator_id: &str,
    ) -> ApiResult<Page<ModerationFlag>> {
        self.require_moderator(moderator_id)?;
        let (items, total) = self.flags.list(status, pagination).await?;
        Ok(Page::new(items, pagination, total))
    }

    fn require_moderator(&self, user_id: &str) -> ApiResult<()> {
        if self.config.is_moderator(user_id) {
            Ok(())
        } else {
            Err(ApiError::authorization("Moderator privileges required"))
        }
    }

    /// User who authored (or is) the reported entity
    async fn target_owner(&self, entity_type: FlaggedEntityType, entity_id: &str) -> ApiResult<String> {
        let not_found = || ApiError::not_found(entity_label(entity_type));

        let owner = match entity_type {
            FlaggedEntityType::User => self
                .targets
                .users
                .find_by_id(entity_id)
                .await?
                .map(|user| user.id),
            FlaggedEntityType::Post => {
                let id = Uuid::parse_str(entity_id).map_err(|_| not_found())?;
                self.targets.posts.find_by_id(id).await?.map(|post| post.author_id)
            }
            FlaggedEntityType::Comment => {
                let id = Uuid::parse_str(entity_id).map_err(|_| not_found())?;
                self.targets
                    .comments
                    .find_by_id(id)
                    .await?
                    .map(|comment| comment.author_id)
            }
            FlaggedEntityType::Message => {
                let id = Uuid::parse_str(entity_id).map_err(|_| not_found())?;
                self.targets
                    .messages
                    .find_by_id(id)
                    .await?
                    .map(|message| message.sender_id)
            }
        };

        owner.ok_or_else(not_found)
    }
}

fn entity_label(entity_type: FlaggedEntityType) -> &'static str {
    match entity_type {
        FlaggedEntityType::Post => "Post",
        FlaggedEntityType::Comment => "Comment",
        FlaggedEntityType::User => "User",
        FlaggedEntityType::Message => "Message",
    }
}
