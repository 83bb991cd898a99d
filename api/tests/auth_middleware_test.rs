//! Integration tests for the session authentication middleware

mod common;

use actix_web::{http::StatusCode, test};
use common::{bearer, send, session_token_with_ttl, TestContext};

#[actix_web::test]
async fn test_missing_header_is_rejected() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTHENTICATION_ERROR");
    assert_eq!(body["error"]["message"], "Missing or invalid Authorization header");
}

#[actix_web::test]
async fn test_malformed_token_is_rejected() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", "Bearer invalid-token"))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["statusCode"], 401);
}

#[actix_web::test]
async fn test_expired_token_is_rejected() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let token = session_token_with_ttl("user_1", -120);
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Session token has expired");
}

#[actix_web::test]
async fn test_valid_token_reaches_handler() {
    let ctx = TestContext::new();
    ctx.seed_users(&["user_1"]).await;
    let app = ctx.init_app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer("user_1"))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "user_1");
}

#[actix_web::test]
async fn test_health_does_not_require_auth() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
}
