//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{JsonPayloadError, PathError, QueryPayloadError},
    middleware::Logger,
    web, App, Error, HttpRequest,
};
use pz_core::repositories::{
    ChatRepository, CommentRepository, DeviceTokenRepository, FollowRepository, MessageRepository,
    ModerationRepository, PostRepository, ReactionRepository, UserRepository,
};
use pz_core::services::{
    DeviceTokenService, FollowService, HealthProbe, HealthService, MediaHost, MediaService,
    MessageService, ModerationService, ReactionService, ReportTargets, UserService,
};
use pz_shared::config::{AppConfig, ModerationConfig};
use pz_shared::ApiError;
use std::sync::Arc;

use crate::middleware::{create_cors, ClerkAuth, ErrorHandler, SessionVerifier};
use crate::routes;

/// One implementation per repository trait
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub flags: Arc<dyn ModerationRepository>,
    pub devices: Arc<dyn DeviceTokenRepository>,
}

/// Services shared by every worker
pub struct AppState {
    pub users: UserService,
    pub reactions: ReactionService,
    pub follows: FollowService,
    pub messages: MessageService,
    pub moderation: ModerationService,
    pub devices: DeviceTokenService,
    pub media: MediaService,
    pub health: HealthService,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        media_host: Arc<dyn MediaHost>,
        probes: Vec<Arc<dyn HealthProbe>>,
        moderation: ModerationConfig,
    ) -> Self {
        let targets = ReportTargets {
            users: repos.users.clone(),
            posts: repos.posts.clone(),
            comments: repos.comments.clone(),
            messages: repos.messages.clone(),
        };

        Self {
            users: UserService::new(repos.users.clone()),
            reactions: ReactionService::new(repos.posts.clone(), repos.reactions),
            follows: FollowService::new(repos.users, repos.follows),
            messages: MessageService::new(repos.chats, repos.messages),
            moderation: ModerationService::new(repos.flags, targets, moderation),
            devices: DeviceTokenService::new(repos.devices),
            media: MediaService::new(media_host),
            health: HealthService::new(probes, env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    verifier: SessionVerifier,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let cors = create_cors(&config.cors, config.environment);
    let max_upload = config.server.max_upload_payload;

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_json_payload)
                .error_handler(|err, _req| json_error(err).into()),
        )
        .app_data(web::QueryConfig::default().error_handler(|err, _req| query_error(err).into()))
        .app_data(web::PathConfig::default().error_handler(|err, _req| path_error(err).into()))
        // Order matters: the logger sees the final response, errors are rendered innermost
        .wrap(ErrorHandler::new(config.environment))
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(routes::health::health))
        .service(
            web::scope("/api/v1")
                .wrap(ClerkAuth::new(verifier))
                .configure(|cfg| routes::configure(cfg, max_upload)),
        )
        .default_service(web::to(not_found))
}

async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::route_not_found(req.method().as_str(), req.path()))
}

fn json_error(err: JsonPayloadError) -> ApiError {
    let message = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large"
        }
        JsonPayloadError::ContentType => "Content-Type must be application/json",
        _ => "Invalid JSON body",
    };
    ApiError::validation(message).with_detail("reason", err.to_string())
}

fn query_error(err: QueryPayloadError) -> ApiError {
    ApiError::validation("Invalid query parameters").with_detail("reason", err.to_string())
}

fn path_error(err: PathError) -> ApiError {
    ApiError::validation("Invalid path parameter").with_detail("reason", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_messages() {
        let error = json_error(JsonPayloadError::ContentType);
        assert_eq!(error.message(), "Content-Type must be application/json");

        let error = json_error(JsonPayloadError::Overflow { limit: 10 });
        assert_eq!(error.status(), 400);
        assert_eq!(error.message(), "Request body is too large");
    }
}
