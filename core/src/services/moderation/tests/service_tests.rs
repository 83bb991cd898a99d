//! Unit tests for reporting and reviewing flags

use pz_shared::config::ModerationConfig;
use pz_shared::types::Pagination;
use std::sync::Arc;

use crate::domain::entities::chat::{Chat, Message};
use crate::domain::entities::moderation::FlagStatus;
use crate::domain::entities::post::{Comment, Post};
use crate::domain::entities::user::User;
use crate::errors::ErrorKind;
use crate::repositories::mock::*;
use crate::repositories::{ChatRepository, CommentRepository, MessageRepository, PostRepository};
use crate::services::moderation::{ModerationService, ReportTargets};

struct Fixture {
    service: ModerationService,
    post: Post,
    comment: Comment,
    message: Message,
}

async fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    users
        .seed([
            User::new("author", "author", "author@example.com"),
            User::new("reporter", "reporter", "reporter@example.com"),
        ])
        .await;

    let posts = Arc::new(MockPostRepository::new());
    let post = posts.create(Post::new("author", "questionable")).await.unwrap();
    let comments = Arc::new(MockCommentRepository::new(posts.clone()));
    let comment = comments.create(Comment::new(post.id, "author", "rude")).await.unwrap();

    let chats = Arc::new(MockChatRepository::new());
    let chat = chats.create(Chat::new(["author", "reporter"])).await.unwrap();
    let messages = Arc::new(MockMessageRepository::new(chats));
    let message = messages.create(Message::new(chat.id, "author", "spam")).await.unwrap();

    let service = ModerationService::new(
        Arc::new(MockModerationRepository::new()),
        ReportTargets {
            users,
            posts,
            comments,
            messages,
        },
        ModerationConfig::with_moderators(["moderator"]),
    );

    Fixture {
        service,
        post,
        comment,
        message,
    }
}

#[tokio::test]
async fn test_report_each_entity_type() {
    let f = fixture().await;
    let targets = [
        ("POST", f.post.id.to_string()),
        ("COMMENT", f.comment.id.to_string()),
        ("USER", "author".to_string()),
        ("MESSAGE", f.message.id.to_string()),
    ];

    for (entity_type, entity_id) in targets {
        let flag = f
            .service
            .report(entity_type, &entity_id, "reporter", "This is spam")
            .await
            .unwrap();
        assert_eq!(flag.status, FlagStatus::Pending);
        assert_eq!(flag.entity_type.as_str(), entity_type);
    }
}

#[tokio::test]
async fn test_report_rejects_unknown_entity_type() {
    let f = fixture().await;
    let err = f.service.report("STORY", "x", "reporter", "spam!").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.message().contains("POST, COMMENT, USER, MESSAGE"));
}

#[tokio::test]
async fn test_report_reason_bounds_after_sanitizing() {
    let f = fixture().await;
    let id = f.post.id.to_string();

    let err = f
        .service
        .report("POST", &id, "reporter", "<script>long hidden text</script>ok")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = f.service.report("POST", &id, "reporter", &"x".repeat(501)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_report_missing_target() {
    let f = fixture().await;
    let err = f
        .service
        .report("POST", &uuid::Uuid::new_v4().to_string(), "reporter", "spam spam")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Post not found");

    let err = f.service.report("USER", "ghost", "reporter", "spam spam").await.unwrap_err();
    assert_eq!(err.message(), "User not found");
}

#[tokio::test]
async fn test_self_report_is_rejected() {
    let f = fixture().await;
    let err = f
        .service
        .report("POST", &f.post.id.to_string(), "author", "my own post")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = f.service.report("USER", "author", "author", "myself").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_duplicate_report_conflicts_regardless_of_status() {
    let f = fixture().await;
    let id = f.post.id.to_string();
    let flag = f.service.report("POST", &id, "reporter", "spam spam").await.unwrap();

    let err = f.service.report("POST", &id, "reporter", "again").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    for status in [FlagStatus::Invalid, FlagStatus::Valid] {
        f.service.update_status(flag.id, status, "moderator").await.unwrap();
        let err = f.service.report("POST", &id, "reporter", "again").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}

#[tokio::test]
async fn test_update_status_requires_moderator() {
    let f = fixture().await;
    let flag = f
        .service
        .report("USER", "author", "reporter", "harassment")
        .await
        .unwrap();

    let err = f
        .service
        .update_status(flag.id, FlagStatus::Valid, "reporter")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = f
        .service
        .update_status(uuid::Uuid::new_v4(), FlagStatus::Valid, "moderator")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_transitions_are_unrestricted() {
    let f = fixture().await;
    let flag = f
        .service
        .report("USER", "author", "reporter", "harassment")
        .await
        .unwrap();

    let valid = f.service.update_status(flag.id, FlagStatus::Valid, "moderator").await.unwrap();
    assert_eq!(valid.reviewed_by.as_deref(), Some("moderator"));

    let reverted = f.service.update_status(flag.id, FlagStatus::Pending, "moderator").await.unwrap();
    assert_eq!(reverted.status, FlagStatus::Pending);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let f = fixture().await;
    let first = f.service.report("USER", "author", "reporter", "harassment").await.unwrap();
    f.service
        .report("POST", &f.post.id.to_string(), "reporter", "spam spam")
        .await
        .unwrap();
    f.service.update_status(first.id, FlagStatus::Invalid, "moderator").await.unwrap();

    let pending = f
        .service
        .list(Some(FlagStatus::Pending), &Pagination::first(20), "moderator")
        .await
        .unwrap();
    assert_eq!(pending.meta.total, 1);

    let all = f.service.list(None, &Pagination::first(20), "moderator").await.unwrap();
    assert_eq!(all.items.len(), 2);

    let err = f.service.list(None, &Pagination::first(20), "reporter").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}
