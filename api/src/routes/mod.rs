//! Route handlers, grouped by resource
//!
//! Every handler body runs inside [`guard`](crate::handlers::guard) and
//! returns `Result<HttpResponse, ApiError>`; formatting errors is left to the
//! terminal error middleware.

pub mod devices;
pub mod follows;
pub mod health;
pub mod media;
pub mod messages;
pub mod moderation;
pub mod reactions;
pub mod users;

use actix_web::web;

/// Register every `/api/v1` resource
pub fn configure(cfg: &mut web::ServiceConfig, max_upload_payload: usize) {
    cfg.configure(users::configure)
        .configure(reactions::configure)
        .configure(follows::configure)
        .configure(messages::configure)
        .configure(moderation::configure)
        .configure(devices::configure)
        .configure(|cfg| media::configure(cfg, max_upload_payload));
}
