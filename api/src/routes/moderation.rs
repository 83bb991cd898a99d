use actix_web::{web, HttpResponse};
use pz_core::domain::entities::FlagStatus;
use pz_shared::types::PageQuery;
use pz_shared::ApiError;
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::{FlagFilterQuery, ReportRequest, UpdateFlagRequest};
use crate::handlers::{created, guard, ok, paginated, validated};
use crate::middleware::AuthContext;

const DEFAULT_LIMIT: u32 = 20;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/moderation/flags")
            .route(web::post().to(report))
            .route(web::get().to(list)),
    )
    .route("/moderation/flags/{flag_id}", web::patch().to(update_status));
}

/// Handler for POST /api/v1/moderation/flags
///
/// # Errors
/// - 400 for an unknown entity type, a bad reason or a self-report
/// - 404 when the reported entity does not exist
/// - 409 when the caller already reported it
pub async fn report(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<ReportRequest>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let request = validated(body.into_inner())?;
        let flag = state
            .moderation
            .report(
                request.entity_type.trim(),
                request.entity_id.trim(),
                &auth.user_id,
                &request.reason,
            )
            .await?;
        Ok::<_, ApiError>(created(flag, "Content reported"))
    })
    .await
}

/// Handler for PATCH /api/v1/moderation/flags/{flag_id}
pub async fn update_status(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateFlagRequest>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let request = validated(body.into_inner())?;
        let status = FlagStatus::parse(request.status.trim())?;
        let flag = state
            .moderation
            .update_status(path.into_inner(), status, &auth.user_id)
            .await?;
        Ok::<_, ApiError>(ok(flag, "Flag updated"))
    })
    .await
}

/// Handler for GET /api/v1/moderation/flags
pub async fn list(
    state: web::Data<AppState>,
    auth: AuthContext,
    filter: web::Query<FlagFilterQuery>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let pagination = query.resolve(DEFAULT_LIMIT)?;
        let status = match filter.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(FlagStatus::parse(value)?),
        };
        let page = state
            .moderation
            .list(status, &pagination, &auth.user_id)
            .await?;
        Ok::<_, ApiError>(paginated(page, "Flags retrieved"))
    })
    .await
}
