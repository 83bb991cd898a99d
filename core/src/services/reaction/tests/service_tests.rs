//! Unit tests for reaction toggling

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::post::Post;
use crate::domain::entities::reaction::ReactionType;
use crate::errors::ErrorKind;
use crate::repositories::mock::{MockPostRepository, MockReactionRepository};
use crate::repositories::PostRepository;
use crate::services::reaction::{ReactionService, ToggleOutcome};

struct Fixture {
    service: ReactionService,
    posts: Arc<MockPostRepository>,
    reactions: Arc<MockReactionRepository>,
}

fn fixture() -> Fixture {
    let posts = Arc::new(MockPostRepository::new());
    let reactions = Arc::new(MockReactionRepository::new());
    Fixture {
        service: ReactionService::new(posts.clone(), reactions.clone()),
        posts,
        reactions,
    }
}

async fn live_post(posts: &MockPostRepository) -> Uuid {
    posts.create(Post::new("author", "hello")).await.unwrap().id
}

#[tokio::test]
async fn test_toggle_three_cycle() {
    let f = fixture();
    let post_id = live_post(&f.posts).await;

    let created = f.service.toggle(post_id, "user_1", ReactionType::Like).await.unwrap();
    assert!(matches!(created, ToggleOutcome::Created(ref r) if r.reaction_type == ReactionType::Like));
    assert_eq!(f.reactions.count_for(post_id, "user_1").await, 1);

    let updated = f.service.toggle(post_id, "user_1", ReactionType::Love).await.unwrap();
    match updated {
        ToggleOutcome::Updated { previous, reaction } => {
            assert_eq!(previous, ReactionType::Like);
            assert_eq!(reaction.reaction_type, ReactionType::Love);
        }
        other => panic!("expected Updated, got {other:?}"),
    }
    assert_eq!(f.reactions.count_for(post_id, "user_1").await, 1);

    let removed = f.service.toggle(post_id, "user_1", ReactionType::Love).await.unwrap();
    assert_eq!(
        removed,
        ToggleOutcome::Removed {
            post_id,
            user_id: "user_1".to_string(),
            reaction_type: ReactionType::Love,
        }
    );
    assert_eq!(f.reactions.count_for(post_id, "user_1").await, 0);
}

#[tokio::test]
async fn test_toggle_missing_post() {
    let f = fixture();
    let err = f
        .service
        .toggle(Uuid::new_v4(), "user_1", ReactionType::Like)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Post not found");
}

#[tokio::test]
async fn test_toggle_deleted_post_is_not_found() {
    let f = fixture();
    let mut post = Post::new("author", "bye");
    post.is_deleted = true;
    let post_id = f.posts.create(post).await.unwrap().id;

    let err = f.service.toggle(post_id, "user_1", ReactionType::Like).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_toggle_expired_post_is_gone() {
    let f = fixture();
    let post = Post::new("author", "story").with_expiry(Utc::now() - Duration::minutes(1));
    let post_id = f.posts.create(post).await.unwrap().id;

    let err = f.service.toggle(post_id, "user_1", ReactionType::Like).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Gone);
    assert_eq!(err.status(), 410);
    assert_eq!(f.reactions.count_for(post_id, "user_1").await, 0);
}

#[tokio::test]
async fn test_remove_without_reaction() {
    let f = fixture();
    let post_id = live_post(&f.posts).await;

    let err = f.service.remove(post_id, "user_1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    f.service.toggle(post_id, "user_1", ReactionType::Sad).await.unwrap();
    let removed = f.service.remove(post_id, "user_1").await.unwrap();
    assert_eq!(removed.reaction_type, ReactionType::Sad);
    assert_eq!(f.reactions.count_for(post_id, "user_1").await, 0);
}

#[tokio::test]
async fn test_summary_counts_and_viewer() {
    let f = fixture();
    let post_id = live_post(&f.posts).await;
    f.service.toggle(post_id, "user_1", ReactionType::Like).await.unwrap();
    f.service.toggle(post_id, "user_2", ReactionType::Like).await.unwrap();
    f.service.toggle(post_id, "user_3", ReactionType::Wow).await.unwrap();

    let summary = f.service.summary(post_id, Some("user_3")).await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.counts.get(&ReactionType::Like), Some(&2));
    assert_eq!(summary.counts.get(&ReactionType::Wow), Some(&1));
    assert_eq!(summary.viewer_reaction, Some(ReactionType::Wow));

    let anonymous = f.service.summary(post_id, None).await.unwrap();
    assert_eq!(anonymous.viewer_reaction, None);
}
