//! Public glossary endpoints. Draft terms are invisible here.

use axum::extract::{Path, State};
use axum::Json;
use faircms_core::cache::{glossary_detail_key, glossary_list_key, glossary_terms_index_key};
use faircms_core::error::CoreError;
use faircms_core::glossary::{build_terms_index, IndexSource};
use faircms_db::repositories::GlossaryTermRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::read_through::cached;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/glossary
///
/// Every published term, ordered by term.
pub async fn list_terms(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let pool = &state.pool;
    let body = cached(&state, glossary_list_key(), move || async move {
        let data = GlossaryTermRepo::list_published(pool).await?;
        Ok::<_, AppError>(DataResponse { data })
    })
    .await?;
    Ok(Json(body))
}

/// GET /api/glossary/terms-index
///
/// Surface forms of every published term (name, abbreviation, alternate
/// names), longest first, for greedy tooltip matching.
pub async fn terms_index(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let pool = &state.pool;
    let body = cached(&state, glossary_terms_index_key(), move || async move {
        let sources: Vec<IndexSource> = GlossaryTermRepo::list_index_sources(pool)
            .await?
            .into_iter()
            .map(IndexSource::from)
            .collect();
        Ok::<_, AppError>(DataResponse {
            data: build_terms_index(&sources),
        })
    })
    .await?;
    Ok(Json(body))
}

/// GET /api/glossary/{slug}
pub async fn get_term(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let key = glossary_detail_key(&slug);
    let pool = &state.pool;
    let body = cached(&state, key, move || async move {
        let Some(data) = GlossaryTermRepo::get_published_detail(pool, &slug).await? else {
            return Err(AppError::Core(CoreError::SlugNotFound {
                entity: "GlossaryTerm",
                slug,
            }));
        };
        Ok::<_, AppError>(DataResponse { data })
    })
    .await?;
    Ok(Json(body))
}
