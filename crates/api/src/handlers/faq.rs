//! Editorial FAQ handlers: entries, versions and the approval workflow.
//!
//! State changes go through [`FaqWorkflow`], which commits the transition and
//! its audit record together. Notifications, cache invalidation and content
//! events run afterwards and never fail the request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use faircms_core::cache::CacheScope;
use faircms_core::error::CoreError;
use faircms_core::notification;
use faircms_core::pagination::{PageInfo, PageRequest, DEFAULT_PAGE_SIZE};
use faircms_core::slug::validate_slug;
use faircms_core::types::DbId;
use faircms_db::models::faq_entry::{CreateFaqEntry, EditorialFaqFilter, UpdateFaqEntry};
use faircms_db::models::faq_version::{CreateFaqVersion, RejectVersion};
use faircms_db::models::tag::SetEntryTags;
use faircms_db::repositories::{AuditLogRepo, FaqEntryRepo, FaqVersionRepo, TagRepo};
use faircms_db::workflow::FaqWorkflow;
use faircms_events::ContentEventKind;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuthor, RequireReviewer};
use crate::query::EditorialFaqParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::side_effects;
use crate::state::AppState;

fn entry_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "FaqEntry",
        id,
    })
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// POST /api/admin/faq
///
/// Creates the entry and its version 1 as a draft.
pub async fn create_faq(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Json(input): Json<CreateFaqEntry>,
) -> AppResult<impl IntoResponse> {
    let created = FaqWorkflow::create(&state.pool, &input, &user.email).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/admin/faq
///
/// Every entry with its latest version, whatever its status.
pub async fn list_faqs(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
    Query(params): Query<EditorialFaqParams>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_PAGE_SIZE);
    let filter = EditorialFaqFilter {
        status: params.status,
        category_id: params.category_id,
        search: params.search,
        page,
    };
    let (data, total) = FaqEntryRepo::list_all(&state.pool, &filter).await?;
    Ok(Json(PaginatedResponse {
        data,
        pagination: PageInfo::new(page, total),
    }))
}

/// GET /api/admin/faq/{id}
pub async fn get_faq(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = FaqEntryRepo::get_detail(&state.pool, id)
        .await?
        .ok_or_else(|| entry_not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/admin/faq/{id}
///
/// Metadata only (slug, category, featured flag, sort order, tags). Content
/// changes go through a new version.
pub async fn update_faq(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateFaqEntry>,
) -> AppResult<impl IntoResponse> {
    if let Some(slug) = input.slug.as_mut() {
        *slug = slug.trim().to_string();
        validate_slug(slug)?;
    }

    let entry = FaqEntryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    tracing::info!(entry_id = id, actor = %user.email, "FAQ entry metadata updated");

    if entry.live_version_id.is_some() {
        side_effects::content_changed(
            &state,
            ContentEventKind::FaqUpdated,
            entry.id,
            &entry.slug,
            &user.email,
        )
        .await;
    } else {
        side_effects::invalidate(&state, CacheScope::Faq).await;
    }

    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/admin/faq/{id}/tags
///
/// Replaces the entry's tag set.
pub async fn set_tags(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetEntryTags>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::set_for_entry(&state.pool, id, &input.tag_ids).await? {
        return Err(entry_not_found(id));
    }
    tracing::info!(entry_id = id, actor = %user.email, tags = input.tag_ids.len(), "FAQ entry tags replaced");
    side_effects::invalidate(&state, CacheScope::Faq).await;

    let tags = TagRepo::list_for_entry(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// DELETE /api/admin/faq/{id}
///
/// Hard delete. Versions and tag links cascade; the audit trail stays.
pub async fn delete_faq(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = FaqWorkflow::delete_entry(&state.pool, id, &user.email).await?;

    if deleted.was_live {
        side_effects::content_changed(
            &state,
            ContentEventKind::FaqDeleted,
            deleted.id,
            &deleted.slug,
            &user.email,
        )
        .await;
    } else {
        side_effects::invalidate(&state, CacheScope::Faq).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

/// POST /api/admin/faq/{id}/version
///
/// Adds a draft version with the next version number. The live version is
/// untouched until this one is approved.
pub async fn create_version(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
    Json(input): Json<CreateFaqVersion>,
) -> AppResult<impl IntoResponse> {
    let version = FaqWorkflow::create_new_version(&state.pool, entry_id, &input, &user.email).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: version })))
}

/// GET /api/admin/faq/{id}/versions
///
/// Full version history, newest first.
pub async fn list_versions(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if FaqEntryRepo::find_by_id(&state.pool, entry_id).await?.is_none() {
        return Err(entry_not_found(entry_id));
    }
    let versions = FaqVersionRepo::list_by_entry(&state.pool, entry_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /api/admin/faq/{id}/audit
///
/// Audit history of an entry, newest first. Still available after the entry
/// has been deleted.
pub async fn entry_audit(
    RequireAuthor(_user): RequireAuthor,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let records = AuditLogRepo::list_by_entry(&state.pool, entry_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// POST /api/admin/faq/version/{id}/submit
pub async fn submit_version(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Path(version_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let version = FaqWorkflow::submit_for_review(&state.pool, version_id, &user.email).await?;

    let message = notification::review_requested(
        &state.config.reviewers_email,
        &user.email,
        version.entry_id,
    );
    side_effects::notify(&state, &message).await;

    Ok(Json(DataResponse { data: version }))
}

/// POST /api/admin/faq/version/{id}/approve
///
/// Publishes the version and moves the entry's live pointer to it. The
/// version's author can never approve it.
pub async fn approve_version(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
    Path(version_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let approved = FaqWorkflow::approve(&state.pool, version_id, &user.email).await?;

    let message =
        notification::approved(&approved.version.author_email, &user.email, approved.entry.id);
    side_effects::notify(&state, &message).await;
    side_effects::content_changed(
        &state,
        ContentEventKind::FaqPublished,
        approved.entry.id,
        &approved.entry.slug,
        &user.email,
    )
    .await;

    Ok(Json(DataResponse { data: approved }))
}

/// POST /api/admin/faq/version/{id}/reject
///
/// Returns the version to draft with the reviewer's note. A note is required.
pub async fn reject_version(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
    Path(version_id): Path<DbId>,
    Json(input): Json<RejectVersion>,
) -> AppResult<impl IntoResponse> {
    let version =
        FaqWorkflow::reject(&state.pool, version_id, &user.email, input.note.as_deref()).await?;

    let message = notification::rejected(
        &version.author_email,
        &user.email,
        version.rejection_note.as_deref().unwrap_or_default(),
        version.entry_id,
    );
    side_effects::notify(&state, &message).await;

    Ok(Json(DataResponse { data: version }))
}
