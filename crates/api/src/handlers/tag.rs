//! Handlers for FAQ tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use faircms_core::cache::CacheScope;
use faircms_core::error::CoreError;
use faircms_core::faq::required_field;
use faircms_core::slug::resolve_slug;
use faircms_core::types::DbId;
use faircms_db::models::tag::CreateTag;
use faircms_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuthor};
use crate::response::DataResponse;
use crate::side_effects;
use crate::state::AppState;

const MAX_TAG_LEN: usize = 100;

/// GET /api/admin/tags
pub async fn list_tags(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/admin/tags
pub async fn create_tag(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let name = required_field("name", Some(&input.name), MAX_TAG_LEN)?;
    let slug = resolve_slug(input.slug.as_deref(), &name)?;

    let tag = TagRepo::create(&state.pool, &name, &slug).await?;
    tracing::info!(tag_id = tag.id, actor = %user.email, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// DELETE /api/admin/tags/{id}
///
/// Links to entries cascade.
pub async fn delete_tag(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }));
    }
    tracing::info!(tag_id = id, actor = %user.email, "Tag deleted");
    side_effects::invalidate(&state, CacheScope::Faq).await;

    Ok(StatusCode::NO_CONTENT)
}
