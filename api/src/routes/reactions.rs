use actix_web::{web, HttpResponse};
use pz_core::domain::entities::ReactionType;
use pz_core::services::ToggleOutcome;
use pz_shared::ApiError;
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::{ReactionRequest, RemovedReaction, UpdatedReaction};
use crate::handlers::{created, guard, ok, validated};
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts/{post_id}/reactions")
            .route(web::post().to(toggle))
            .route(web::delete().to(remove))
            .route(web::get().to(summary)),
    );
}

/// Handler for POST /api/v1/posts/{post_id}/reactions
///
/// 201 when a reaction was created, 200 when it was switched to another
/// type or removed because the same type was sent again.
pub async fn toggle(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<ReactionRequest>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let post_id = path.into_inner();
        let request = validated(body.into_inner())?;
        let requested = ReactionType::parse(request.reaction_type.trim())?;

        let response = match state.reactions.toggle(post_id, &auth.user_id, requested).await? {
            ToggleOutcome::Created(reaction) => created(reaction, "Reaction added"),
            ToggleOutcome::Updated { previous, reaction } => ok(
                UpdatedReaction {
                    reaction,
                    previous_type: previous,
                },
                "Reaction updated",
            ),
            ToggleOutcome::Removed {
                post_id,
                user_id,
                reaction_type,
            } => ok(RemovedReaction::new(post_id, user_id, reaction_type), "Reaction removed"),
        };
        Ok::<_, ApiError>(response)
    })
    .await
}

/// Handler for DELETE /api/v1/posts/{post_id}/reactions
pub async fn remove(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let reaction = state.reactions.remove(path.into_inner(), &auth.user_id).await?;
        let body = RemovedReaction::new(reaction.post_id, reaction.user_id, reaction.reaction_type);
        Ok::<_, ApiError>(ok(body, "Reaction removed"))
    })
    .await
}

/// Handler for GET /api/v1/posts/{post_id}/reactions
pub async fn summary(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    guard(async move {
        let summary = state
            .reactions
            .summary(path.into_inner(), Some(&auth.user_id))
            .await?;
        Ok::<_, ApiError>(ok(summary, "Reactions retrieved"))
    })
    .await
}
