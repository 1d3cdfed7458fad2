//! Public FAQ endpoints. Only live versions are ever visible here.

use axum::extract::{Path, Query, State};
use axum::Json;
use faircms_core::cache::{faq_categories_key, faq_detail_key, faq_list_key};
use faircms_core::error::CoreError;
use faircms_core::pagination::{PageInfo, PageRequest, DEFAULT_PAGE_SIZE};
use faircms_db::models::faq_entry::PublicFaqFilter;
use faircms_db::repositories::{CategoryRepo, FaqEntryRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::read_through::cached;
use crate::query::PublicFaqParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// GET /api/faq
///
/// Published entries, featured first, optionally filtered by category and
/// tag slug. The total honours the same filters.
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(params): Query<PublicFaqParams>,
) -> AppResult<Json<serde_json::Value>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_PAGE_SIZE);
    let key = faq_list_key(
        page.page,
        page.limit,
        params.category.as_deref(),
        params.tag.as_deref(),
    );

    let filter = PublicFaqFilter {
        category_slug: params.category,
        tag_slug: params.tag,
        page,
    };

    let pool = &state.pool;
    let body = cached(&state, key, move || async move {
        let (data, total) = FaqEntryRepo::list_published(pool, &filter).await?;
        Ok::<_, AppError>(PaginatedResponse {
            data,
            pagination: PageInfo::new(page, total),
        })
    })
    .await?;

    Ok(Json(body))
}

/// GET /api/faq/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let pool = &state.pool;
    let body = cached(&state, faq_categories_key(), move || async move {
        let data = CategoryRepo::list(pool).await?;
        Ok::<_, AppError>(DataResponse { data })
    })
    .await?;
    Ok(Json(body))
}

/// GET /api/faq/{slug}
///
/// 404 unless the entry exists and has a live version.
pub async fn get_faq(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let key = faq_detail_key(&slug);
    let pool = &state.pool;
    let body = cached(&state, key, move || async move {
        let Some(data) = FaqEntryRepo::get_public_by_slug(pool, &slug).await? else {
            return Err(AppError::Core(CoreError::SlugNotFound {
                entity: "FaqEntry",
                slug,
            }));
        };
        Ok::<_, AppError>(DataResponse { data })
    })
    .await?;
    Ok(Json(body))
}
