//! Handlers for FAQ categories and glossary categories.
//!
//! Listing is open to any editor; changes require admin. Deleting a category
//! detaches its entries or terms rather than deleting them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use faircms_core::cache::CacheScope;
use faircms_core::error::CoreError;
use faircms_core::faq::required_field;
use faircms_core::slug::{resolve_slug, validate_slug};
use faircms_core::types::DbId;
use faircms_db::models::category::{CreateCategory, CreateGlossaryCategory, UpdateCategory};
use faircms_db::repositories::{CategoryRepo, GlossaryCategoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuthor};
use crate::response::DataResponse;
use crate::side_effects;
use crate::state::AppState;

const MAX_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// FAQ categories
// ---------------------------------------------------------------------------

/// GET /api/admin/categories
pub async fn list_categories(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/admin/categories
pub async fn create_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let name = required_field("name", Some(&input.name), MAX_NAME_LEN)?;
    let slug = resolve_slug(input.slug.as_deref(), &name)?;

    let category = CategoryRepo::create(
        &state.pool,
        &name,
        &slug,
        input.description.as_deref(),
        input.sort_order,
    )
    .await?;

    tracing::info!(category_id = category.id, actor = %user.email, "FAQ category created");
    side_effects::invalidate(&state, CacheScope::Faq).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        input.name = Some(required_field("name", Some(name), MAX_NAME_LEN)?);
    }
    if let Some(slug) = input.slug.as_mut() {
        *slug = slug.trim().to_string();
        validate_slug(slug)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, actor = %user.email, "FAQ category updated");
    side_effects::invalidate(&state, CacheScope::Faq).await;

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(category_id = id, actor = %user.email, "FAQ category deleted");
    side_effects::invalidate(&state, CacheScope::Faq).await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Glossary categories
// ---------------------------------------------------------------------------

/// GET /api/admin/glossary/categories
pub async fn list_glossary_categories(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = GlossaryCategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/admin/glossary/categories
pub async fn create_glossary_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGlossaryCategory>,
) -> AppResult<impl IntoResponse> {
    let name = required_field("name", Some(&input.name), MAX_NAME_LEN)?;
    let slug = resolve_slug(input.slug.as_deref(), &name)?;

    let category = GlossaryCategoryRepo::create(&state.pool, &name, &slug).await?;

    tracing::info!(category_id = category.id, actor = %user.email, "Glossary category created");
    side_effects::invalidate(&state, CacheScope::Glossary).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// DELETE /api/admin/glossary/categories/{id}
pub async fn delete_glossary_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !GlossaryCategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GlossaryCategory",
            id,
        }));
    }

    tracing::info!(category_id = id, actor = %user.email, "Glossary category deleted");
    side_effects::invalidate(&state, CacheScope::Glossary).await;

    Ok(StatusCode::NO_CONTENT)
}
