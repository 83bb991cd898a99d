//! Follow graph endpoints

mod common;

use actix_web::{http::StatusCode, test};
use common::{bearer, send, TestContext};

#[actix_web::test]
async fn test_self_follow_is_rejected() {
    let ctx = TestContext::new();
    ctx.seed_users(&["alice"]).await;
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/alice/follow")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "You cannot follow yourself");
}

#[actix_web::test]
async fn test_follow_twice_conflicts() {
    let ctx = TestContext::new();
    ctx.seed_users(&["alice", "bob"]).await;
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/bob/follow")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["followerId"], "alice");
    assert_eq!(body["data"]["followeeId"], "bob");

    let req = test::TestRequest::post()
        .uri("/api/v1/users/bob/follow")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["details"]["followeeId"], "bob");
}

#[actix_web::test]
async fn test_follow_unknown_user_is_not_found() {
    let ctx = TestContext::new();
    ctx.seed_users(&["alice"]).await;
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/ghost/follow")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");
}

#[actix_web::test]
async fn test_unfollow_without_relation_is_not_found() {
    let ctx = TestContext::new();
    ctx.seed_users(&["alice", "bob"]).await;
    let app = ctx.init_app().await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/users/bob/follow")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_followers_are_paginated() {
    let ctx = TestContext::new();
    ctx.seed_users(&["alice", "bob", "carol"]).await;
    let app = ctx.init_app().await;

    for follower in ["alice", "bob"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/users/carol/follow")
            .insert_header(bearer(follower))
            .to_request();
        send(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/users/carol/followers?page=2&limit=1")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["pages"], 2);
    assert_eq!(body["pagination"]["hasNext"], false);
}
