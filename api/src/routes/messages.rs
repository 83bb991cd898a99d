use actix_web::{web, HttpResponse};
use pz_shared::types::PageQuery;
use pz_shared::ApiError;
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::{MarkAllReadResponse, SendMessageRequest};
use crate::handlers::{created, guard, ok, paginated, validated};
use crate::middleware::AuthContext;

const DEFAULT_LIMIT: u32 = 50;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/chats/{chat_id}/messages")
            .route(web::post().to(send))
            .route(web::get().to(list)),
    )
    .route("/chats/{chat_id}/read", web::post().to(mark_all_read))
    .route("/messages/{message_id}/delivered", web::post().to(mark_delivered))
    .route("/messages/{message_id}/read", web::post().to(mark_read));
}

/// Handler for POST /api/v1/chats/{chat_id}/messages
pub async fn send(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let request = validated(body.into_inner())?;
        let message = state
            .messages
            .send(path.into_inner(), &auth.user_id, &request.content)
            .await?;
        Ok::<_, ApiError>(created(message, "Message sent"))
    })
    .await
}

/// Handler for GET /api/v1/chats/{chat_id}/messages, newest first
pub async fn list(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let pagination = query.resolve(DEFAULT_LIMIT)?;
        let page = state
            .messages
            .list(path.into_inner(), &auth.user_id, &pagination)
            .await?;
        Ok::<_, ApiError>(paginated(page, "Messages retrieved"))
    })
    .await
}

/// Handler for POST /api/v1/chats/{chat_id}/read
pub async fn mark_all_read(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let updated = state
            .messages
            .mark_all_read(path.into_inner(), &auth.user_id)
            .await?;
        Ok::<_, ApiError>(ok(MarkAllReadResponse { updated }, "Messages marked as read"))
    })
    .await
}

/// Handler for POST /api/v1/messages/{message_id}/delivered
///
/// A repeat call, or one made by the sender, answers 200 with
/// `changed: false`.
pub async fn mark_delivered(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let outcome = state
            .messages
            .mark_delivered(path.into_inner(), &auth.user_id)
            .await?;
        Ok::<_, ApiError>(ok(outcome, "Message marked as delivered"))
    })
    .await
}

/// Handler for POST /api/v1/messages/{message_id}/read
pub async fn mark_read(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let outcome = state
            .messages
            .mark_read(path.into_inner(), &auth.user_id)
            .await?;
        Ok::<_, ApiError>(ok(outcome, "Message marked as read"))
    })
    .await
}
