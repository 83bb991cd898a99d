use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use pz_api::{create_app, middleware::SessionVerifier, AppState, Repositories};
use pz_core::services::{HealthProbe, MediaHost};
use pz_infra::database::{
    DatabasePool, MySqlChatRepository, MySqlCommentRepository, MySqlDeviceTokenRepository,
    MySqlFollowRepository, MySqlMessageRepository, MySqlModerationRepository, MySqlPostRepository,
    MySqlReactionRepository, MySqlUserRepository,
};
use pz_infra::health::{DatabaseProbe, UnconfiguredMediaProbe};
use pz_infra::media::{CloudinaryMediaHost, UnconfiguredMediaHost};
use pz_infra::InfrastructureError;
use pz_shared::config::{AppConfig, ConfigError, LoggingConfig};
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Failures that stop the server before it binds
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Invalid CLERK_JWT_KEY: {0}")]
    Identity(#[from] jsonwebtoken::errors::Error),
}

impl From<StartupError> for io::Error {
    fn from(error: StartupError) -> Self {
        io::Error::other(error.to_string())
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env();
    init_logging(&config.logging);

    info!(
        "Starting Plaza API Server v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );
    config.validate().map_err(StartupError::from)?;

    let verifier = SessionVerifier::from_config(&config.identity).map_err(StartupError::from)?;
    if !verifier.is_configured() {
        warn!("CLERK_JWT_KEY is not set; every /api/v1 request will be rejected");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(StartupError::from)?;
    pool.run_migrations().await.map_err(StartupError::from)?;
    info!("{}", pool.get_statistics());

    let (media_host, media_probe) = media_adapters(&config)?;
    let mut probes: Vec<Arc<dyn HealthProbe>> = vec![Arc::new(DatabaseProbe::new(pool.clone()))];
    probes.extend(media_probe);

    let state = web::Data::new(AppState::new(
        repositories(&pool),
        media_host,
        probes,
        config.moderation.clone(),
    ));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Server will bind to: {}", bind_address);

    let server = HttpServer::new(move || create_app(state.clone(), verifier.clone(), &config));
    let server = if workers > 0 { server.workers(workers) } else { server };

    server.bind(&bind_address)?.run().await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.level.as_str()));
    if !config.colored {
        builder.write_style(env_logger::WriteStyle::Never);
    }
    if !config.timestamp {
        builder.format_timestamp(None);
    }
    builder.init();
}

fn repositories(pool: &DatabasePool) -> Repositories {
    let pool = pool.get_pool().clone();
    Repositories {
        users: Arc::new(MySqlUserRepository::new(pool.clone())),
        posts: Arc::new(MySqlPostRepository::new(pool.clone())),
        comments: Arc::new(MySqlCommentRepository::new(pool.clone())),
        reactions: Arc::new(MySqlReactionRepository::new(pool.clone())),
        follows: Arc::new(MySqlFollowRepository::new(pool.clone())),
        chats: Arc::new(MySqlChatRepository::new(pool.clone())),
        messages: Arc::new(MySqlMessageRepository::new(pool.clone())),
        flags: Arc::new(MySqlModerationRepository::new(pool.clone())),
        devices: Arc::new(MySqlDeviceTokenRepository::new(pool)),
    }
}

/// Cloudinary when credentials are present; otherwise uploads fail with an
/// external service error, and production reports the media host as degraded.
fn media_adapters(
    config: &AppConfig,
) -> Result<(Arc<dyn MediaHost>, Option<Arc<dyn HealthProbe>>), StartupError> {
    if config.media.is_configured() {
        let cloudinary = Arc::new(CloudinaryMediaHost::new(&config.media)?);
        let host: Arc<dyn MediaHost> = cloudinary.clone();
        let probe: Arc<dyn HealthProbe> = cloudinary;
        return Ok((host, Some(probe)));
    }

    warn!("Cloudinary credentials are not set; media uploads are disabled");
    let host: Arc<dyn MediaHost> = Arc::new(UnconfiguredMediaHost);
    let probe: Option<Arc<dyn HealthProbe>> = if config.environment.is_production() {
        Some(Arc::new(UnconfiguredMediaProbe))
    } else {
        None
    };
    Ok((host, probe))
}
