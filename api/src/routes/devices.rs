use actix_web::{web, HttpResponse};
use pz_core::domain::entities::DevicePlatform;
use pz_shared::ApiError;

use crate::app::AppState;
use crate::dto::RegisterDeviceRequest;
use crate::handlers::{created, guard, ok, validated};
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/devices/tokens", web::post().to(register))
        .route("/devices/tokens/{token}", web::delete().to(unregister));
}

/// Handler for POST /api/v1/devices/tokens
///
/// 201 for a token seen for the first time, 200 when an existing token was
/// refreshed or moved to the caller.
pub async fn register(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<RegisterDeviceRequest>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let request = validated(body.into_inner())?;
        let platform = DevicePlatform::parse(request.platform.trim())?;
        let outcome = state
            .devices
            .register(&auth.user_id, &request.token, platform)
            .await?;

        let response = if outcome.is_new() {
            created(outcome.device(), "Device registered")
        } else {
            ok(outcome.device(), "Device updated")
        };
        Ok::<_, ApiError>(response)
    })
    .await
}

/// Handler for DELETE /api/v1/devices/tokens/{token}
pub async fn unregister(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        state.devices.unregister(&auth.user_id, &path).await?;
        Ok::<_, ApiError>(ok((), "Device unregistered"))
    })
    .await
}
