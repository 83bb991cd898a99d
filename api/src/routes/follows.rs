use actix_web::{web, HttpResponse};
use pz_shared::types::PageQuery;
use pz_shared::ApiError;

use crate::app::AppState;
use crate::handlers::{created, guard, ok, paginated};
use crate::middleware::AuthContext;

const DEFAULT_LIMIT: u32 = 20;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users/{user_id}/follow")
            .route(web::post().to(follow))
            .route(web::delete().to(unfollow)),
    )
    .route("/users/{user_id}/followers", web::get().to(followers))
    .route("/users/{user_id}/following", web::get().to(following));
}

/// Handler for POST /api/v1/users/{user_id}/follow
pub async fn follow(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let follow = state.follows.follow(&auth.user_id, &path).await?;
        Ok::<_, ApiError>(created(follow, "User followed"))
    })
    .await
}

/// Handler for DELETE /api/v1/users/{user_id}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        state.follows.unfollow(&auth.user_id, &path).await?;
        Ok::<_, ApiError>(ok((), "User unfollowed"))
    })
    .await
}

/// Handler for GET /api/v1/users/{user_id}/followers
pub async fn followers(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let pagination = query.resolve(DEFAULT_LIMIT)?;
        let page = state.follows.followers(&path, &pagination).await?;
        Ok::<_, ApiError>(paginated(page, "Followers retrieved"))
    })
    .await
}

/// Handler for GET /api/v1/users/{user_id}/following
pub async fn following(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let pagination = query.resolve(DEFAULT_LIMIT)?;
        let page = state.follows.following(&path, &pagination).await?;
        Ok::<_, ApiError>(paginated(page, "Following retrieved"))
    })
    .await
}
