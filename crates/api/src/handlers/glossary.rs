//! Editorial glossary handlers.
//!
//! Terms have no review workflow: `status` flips directly between draft and
//! published. Publishing, unpublishing and editing a published term announce
//! the change and invalidate the public glossary cache.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use faircms_core::error::CoreError;
use faircms_core::faq::required_field;
use faircms_core::glossary::{
    normalize_alternate_names, normalize_related_ids, validate_term_fields, GlossaryStatus,
    MAX_SHORT_DEFINITION_LEN, MAX_TERM_LEN,
};
use faircms_core::pagination::{PageInfo, PageRequest, DEFAULT_GLOSSARY_PAGE_SIZE};
use faircms_core::sanitize::sanitize_opt;
use faircms_core::slug::{resolve_slug, validate_slug};
use faircms_core::types::DbId;
use faircms_db::models::glossary::{
    CreateGlossaryTerm, GlossaryFilter, GlossaryTerm, UpdateGlossaryTerm,
};
use faircms_db::repositories::{GlossaryTermRepo, TermRelationshipRepo};
use faircms_events::ContentEventKind;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuthor, RequireReviewer};
use crate::query::GlossaryParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::side_effects;
use crate::state::AppState;

/// Body of `PUT /api/admin/glossary/{id}/related`.
#[derive(Debug, Deserialize)]
pub struct SetRelatedTerms {
    pub related_term_ids: Vec<DbId>,
}

fn term_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GlossaryTerm",
        id,
    })
}

fn is_published(term: &GlossaryTerm) -> bool {
    term.status == GlossaryStatus::Published.as_str()
}

/// Which public change, if any, a before/after pair of statuses represents.
fn change_kind(was_published: bool, now_published: bool) -> Option<ContentEventKind> {
    match (was_published, now_published) {
        (false, true) => Some(ContentEventKind::GlossaryPublished),
        (true, true) => Some(ContentEventKind::GlossaryUpdated),
        (true, false) => Some(ContentEventKind::GlossaryDeleted),
        (false, false) => None,
    }
}

/// Validate and normalize a new term, returning it with its resolved slug.
pub(crate) fn prepare_new_term(input: CreateGlossaryTerm) -> AppResult<(CreateGlossaryTerm, String)> {
    let (term, short_definition) =
        validate_term_fields(Some(&input.term), Some(&input.short_definition))?;
    let slug = resolve_slug(input.slug.as_deref(), &term)?;
    // A new term has no id yet, so it cannot appear in its own list.
    let related_term_ids = input
        .related_term_ids
        .as_deref()
        .map(|ids| normalize_related_ids(0, ids))
        .transpose()?;

    let validated = CreateGlossaryTerm {
        term,
        slug: Some(slug.clone()),
        short_definition,
        long_definition: sanitize_opt(input.long_definition.as_deref()),
        alternate_names: input.alternate_names.as_deref().map(normalize_alternate_names),
        related_term_ids,
        ..input
    };
    Ok((validated, slug))
}

/// POST /api/admin/glossary
///
/// Creates a draft term, optionally with outgoing related terms.
pub async fn create_term(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Json(input): Json<CreateGlossaryTerm>,
) -> AppResult<impl IntoResponse> {
    let (validated, slug) = prepare_new_term(input)?;

    let created = GlossaryTermRepo::create(&state.pool, &validated, &slug, &user.email).await?;
    tracing::info!(term_id = created.id, slug = %created.slug, actor = %user.email, "Glossary term created");

    let detail = GlossaryTermRepo::with_relations(&state.pool, created).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/admin/glossary
pub async fn list_terms(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
    Query(params): Query<GlossaryParams>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_GLOSSARY_PAGE_SIZE);
    let filter = GlossaryFilter {
        status: params.status,
        category_id: params.category_id,
        search: params.search,
        page,
    };
    let (data, total) = GlossaryTermRepo::list_all(&state.pool, &filter).await?;
    Ok(Json(PaginatedResponse {
        data,
        pagination: PageInfo::new(page, total),
    }))
}

/// GET /api/admin/glossary/{id}
///
/// Any status, with category and related terms.
pub async fn get_term(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = GlossaryTermRepo::get_detail(&state.pool, id)
        .await?
        .ok_or_else(|| term_not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/admin/glossary/{id}
///
/// Partial update. Omitted fields keep their values; `status` publishes or
/// unpublishes; `related_term_ids` replaces the outgoing relationships.
pub async fn update_term(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateGlossaryTerm>,
) -> AppResult<impl IntoResponse> {
    let before = GlossaryTermRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| term_not_found(id))?;

    if let Some(term) = input.term.as_deref() {
        input.term = Some(required_field("term", Some(term), MAX_TERM_LEN)?);
    }
    if let Some(def) = input.short_definition.as_deref() {
        input.short_definition = Some(required_field(
            "short_definition",
            Some(def),
            MAX_SHORT_DEFINITION_LEN,
        )?);
    }
    if let Some(slug) = input.slug.as_mut() {
        *slug = slug.trim().to_string();
        validate_slug(slug)?;
    }
    input.long_definition = sanitize_opt(input.long_definition.as_deref());
    if let Some(names) = input.alternate_names.as_deref() {
        input.alternate_names = Some(normalize_alternate_names(names));
    }
    if let Some(ids) = input.related_term_ids.as_deref() {
        input.related_term_ids = Some(normalize_related_ids(id, ids)?);
    }

    let term = GlossaryTermRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| term_not_found(id))?;

    tracing::info!(term_id = id, status = %term.status, actor = %user.email, "Glossary term updated");

    if let Some(kind) = change_kind(is_published(&before), is_published(&term)) {
        side_effects::content_changed(&state, kind, term.id, &term.slug, &user.email).await;
    }

    let detail = GlossaryTermRepo::with_relations(&state.pool, term).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/admin/glossary/{id}/related
pub async fn set_related(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetRelatedTerms>,
) -> AppResult<impl IntoResponse> {
    let related = normalize_related_ids(id, &input.related_term_ids)?;
    if !TermRelationshipRepo::set_related(&state.pool, id, &related).await? {
        return Err(term_not_found(id));
    }

    let detail = GlossaryTermRepo::get_detail(&state.pool, id)
        .await?
        .ok_or_else(|| term_not_found(id))?;

    if is_published(&detail.term) {
        side_effects::content_changed(
            &state,
            ContentEventKind::GlossaryUpdated,
            id,
            &detail.term.slug,
            &user.email,
        )
        .await;
    }

    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/admin/glossary/{id}
///
/// Relationships in both directions cascade.
pub async fn delete_term(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let term = GlossaryTermRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| term_not_found(id))?;

    if !GlossaryTermRepo::delete(&state.pool, id).await? {
        return Err(term_not_found(id));
    }
    tracing::info!(term_id = id, slug = %term.slug, actor = %user.email, "Glossary term deleted");

    if is_published(&term) {
        side_effects::content_changed(
            &state,
            ContentEventKind::GlossaryDeleted,
            id,
            &term.slug,
            &user.email,
        )
        .await;
    }

    Ok(StatusCode::NO_CONTENT)
}
