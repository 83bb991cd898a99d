use actix_web::{web, HttpResponse};
use pz_core::domain::entities::UploadProfile;
use pz_shared::ApiError;

use crate::app::AppState;
use crate::dto::UploadQuery;
use crate::handlers::{created, guard, ok};
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig, max_upload_payload: usize) {
    cfg.service(
        web::resource("/media")
            .app_data(web::PayloadConfig::new(max_upload_payload))
            .route(web::post().to(upload)),
    )
    .route("/media/{public_id:.*}", web::delete().to(delete));
}

/// Handler for POST /api/v1/media?profile=avatar|image|video
///
/// The request body is the raw file.
pub async fn upload(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let profile = UploadProfile::parse(query.profile_name())?;
        let asset = state
            .media
            .upload(body.to_vec(), profile, &auth.user_id)
            .await?;
        Ok::<_, ApiError>(created(asset, "Media uploaded"))
    })
    .await
}

/// Handler for DELETE /api/v1/media/{public_id}
pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        state.media.delete(&path, &auth.user_id).await?;
        Ok::<_, ApiError>(ok((), "Media deleted"))
    })
    .await
}
