use actix_web::{web, HttpResponse};
use pz_shared::ApiError;

use crate::app::AppState;
use crate::dto::UpdateProfileRequest;
use crate::handlers::{guard, ok, validated};
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users/me")
            .route(web::get().to(me))
            .route(web::patch().to(update_me)),
    );
}

/// Handler for GET /api/v1/users/me
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let user = state.users.get(&auth.user_id).await?;
        Ok::<_, ApiError>(ok(user, "Profile retrieved"))
    })
    .await
}

/// Handler for PATCH /api/v1/users/me
///
/// # Errors
/// - 400 when no field is given or a field is malformed
/// - 404 when the caller has no local profile yet
/// - 409 when the username or email is taken
pub async fn update_me(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let request = validated(body.into_inner())?;
        let user = state.users.update_profile(&auth.user_id, request.into()).await?;
        Ok::<_, ApiError>(ok(user, "Profile updated"))
    })
    .await
}
