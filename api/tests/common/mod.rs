//! Shared fixtures for the API integration tests
//!
//! Builds the real application over in-memory repositories and a mock media
//! host, and mints RS256 session tokens the app accepts.

#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header::AUTHORIZATION, StatusCode},
    test, web,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use pz_api::{create_app, middleware::SessionVerifier, AppState, Repositories};
use pz_core::domain::entities::{Chat, Message, Post, User};
use pz_core::repositories::mock::{
    MockChatRepository, MockCommentRepository, MockDeviceTokenRepository, MockFollowRepository,
    MockMessageRepository, MockModerationRepository, MockPostRepository, MockReactionRepository,
    MockUserRepository,
};
use pz_core::repositories::{ChatRepository, PostRepository};
use pz_core::services::media::mock::MockMediaHost;
use pz_core::services::HealthProbe;
use pz_shared::config::{AppConfig, Environment, IdentityConfig, ModerationConfig};
use pz_shared::types::ServiceHealth;
use serde_json::{json, Value};
use std::sync::Arc;

pub const PRIVATE_KEY: &str = include_str!("../fixtures/session_private.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/session_public.pem");

pub const MODERATOR_ID: &str = "user_moderator";

/// Probe reporting a fixed result
pub struct StaticProbe {
    pub name: &'static str,
    pub health: ServiceHealth,
}

#[async_trait]
impl HealthProbe for StaticProbe {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> ServiceHealth {
        self.health.clone()
    }
}

/// Mock-backed application plus handles on its stores
pub struct TestContext {
    pub config: AppConfig,
    pub users: Arc<MockUserRepository>,
    pub posts: Arc<MockPostRepository>,
    pub reactions: Arc<MockReactionRepository>,
    pub chats: Arc<MockChatRepository>,
    pub messages: Arc<MockMessageRepository>,
    pub devices: Arc<MockDeviceTokenRepository>,
    pub media: Arc<MockMediaHost>,
    state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(Environment::Development, Vec::new())
    }

    pub fn production() -> Self {
        Self::build(Environment::Production, Vec::new())
    }

    pub fn with_probes(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        Self::build(Environment::Development, probes)
    }

    fn build(environment: Environment, probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        let config = AppConfig {
            environment,
            identity: IdentityConfig::default().with_public_key(PUBLIC_KEY),
            moderation: ModerationConfig::with_moderators([MODERATOR_ID]),
            ..AppConfig::default()
        };

        let users = Arc::new(MockUserRepository::new());
        let posts = Arc::new(MockPostRepository::new());
        let reactions = Arc::new(MockReactionRepository::new());
        let chats = Arc::new(MockChatRepository::new());
        let messages = Arc::new(MockMessageRepository::new(chats.clone()));
        let devices = Arc::new(MockDeviceTokenRepository::new());
        let media = Arc::new(MockMediaHost::new());

        let repos = Repositories {
            users: users.clone(),
            posts: posts.clone(),
            comments: Arc::new(MockCommentRepository::new(posts.clone())),
            reactions: reactions.clone(),
            follows: Arc::new(MockFollowRepository::new()),
            chats: chats.clone(),
            messages: messages.clone(),
            flags: Arc::new(MockModerationRepository::new()),
            devices: devices.clone(),
        };

        let state = web::Data::new(AppState::new(
            repos,
            media.clone(),
            probes,
            config.moderation.clone(),
        ));

        Self {
            config,
            users,
            posts,
            reactions,
            chats,
            messages,
            devices,
            media,
            state,
        }
    }

    pub async fn init_app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
        let verifier = SessionVerifier::from_config(&self.config.identity).expect("test key is valid");
        test::init_service(create_app(self.state.clone(), verifier, &self.config)).await
    }

    pub async fn seed_users(&self, ids: &[&str]) {
        let users = ids
            .iter()
            .map(|id| User::new(*id, format!("{id}_name"), format!("{id}@plaza.test")));
        self.users.seed(users).await;
    }

    pub async fn seed_post(&self, author_id: &str) -> Post {
        self.posts
            .create(Post::new(author_id, "hello plaza"))
            .await
            .expect("post stored")
    }

    pub async fn seed_chat(&self, participants: &[&str]) -> Chat {
        self.chats
            .create(Chat::new(participants.iter().copied()))
            .await
            .expect("chat stored")
    }

    pub async fn seed_message(&self, chat: &Chat, sender_id: &str) -> Message {
        let message = Message::new(chat.id, sender_id, "hi there");
        self.messages.seed(message.clone()).await;
        message
    }
}

/// Session token for `user_id`, valid for an hour unless `ttl_secs` says otherwise
pub fn session_token_with_ttl(user_id: &str, ttl_secs: i64) -> String {
    let claims = json!({
        "sub": user_id,
        "sid": format!("sess_{user_id}"),
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + Duration::seconds(ttl_secs)).timestamp(),
    });
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).expect("test key is valid");
    encode(&Header::new(Algorithm::RS256), &claims, &key).expect("token encodes")
}

pub fn session_token(user_id: &str) -> String {
    session_token_with_ttl(user_id, 3600)
}

pub fn bearer(user_id: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", session_token(user_id)))
}

/// Call the service and decode the JSON envelope
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

pub fn healthy(name: &'static str) -> Arc<dyn HealthProbe> {
    Arc::new(StaticProbe {
        name,
        health: ServiceHealth::healthy(),
    })
}

pub fn unhealthy(name: &'static str, message: &str) -> Arc<dyn HealthProbe> {
    Arc::new(StaticProbe {
        name,
        health: ServiceHealth::unhealthy(message),
    })
}
