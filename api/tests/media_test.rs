//! Media upload and deletion over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use common::{bearer, send, TestContext};
use pz_core::errors::MediaHostError;

#[actix_web::test]
async fn test_avatar_upload_lands_in_user_namespace() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/media?profile=avatar")
        .insert_header(bearer("alice"))
        .set_payload(vec![0x89, 0x50, 0x4e, 0x47])
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["bytes"], 4);
    assert!(body["data"]["publicId"]
        .as_str()
        .unwrap()
        .starts_with("users/alice/avatar/"));
    assert_eq!(ctx.media.stored().await.len(), 1);
}

#[actix_web::test]
async fn test_empty_upload_is_rejected() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/media")
        .insert_header(bearer("alice"))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "File is empty");
}

#[actix_web::test]
async fn test_unknown_profile_is_rejected() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/media?profile=document")
        .insert_header(bearer("alice"))
        .set_payload(vec![1, 2, 3])
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_host_outage_is_external_service_error() {
    let ctx = TestContext::new();
    ctx.media
        .fail_next(MediaHostError::new(Some(503), "Service Unavailable"))
        .await;
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/media?profile=image")
        .insert_header(bearer("alice"))
        .set_payload(vec![1, 2, 3])
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
}

#[actix_web::test]
async fn test_delete_is_limited_to_uploader() {
    let ctx = TestContext::new();
    let app = ctx.init_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/media?profile=image")
        .insert_header(bearer("alice"))
        .set_payload(vec![1, 2, 3])
        .to_request();
    let (_, body) = send(&app, req).await;
    let public_id = body["data"]["publicId"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/media/{public_id}"))
        .insert_header(bearer("bob"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "You can only delete your own media");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/media/{public_id}"))
        .insert_header(bearer("alice"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ctx.media.stored().await.is_empty());
}
