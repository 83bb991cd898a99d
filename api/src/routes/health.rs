use actix_web::{http::StatusCode, web, HttpResponse};
use pz_shared::error_codes;
use pz_shared::types::ApiResponse;

use crate::app::AppState;
use crate::handlers::respond;

/// Handler for GET /health
///
/// 200 with the report as `data` when every probe is healthy; otherwise a
/// 503 failure envelope carrying the report in `error.details`.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let report = state.health.report().await;

    if report.is_healthy() {
        return respond(StatusCode::OK, ApiResponse::success(report, "Service is healthy"));
    }

    log::warn!("Health check failed: {:?}", report.status);
    respond(
        StatusCode::SERVICE_UNAVAILABLE,
        ApiResponse::<()>::failure(
            "Service is unhealthy",
            StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            error_codes::SERVICE_UNAVAILABLE,
            serde_json::to_value(&report).ok(),
        ),
    )
}
