//! Handlers for the cross-entry audit view.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use faircms_core::roles::{require_role, Role};
use faircms_core::workflow::normalize_email;
use faircms_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::AuditParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/audit?actor=&limit=
///
/// Everything an actor did, newest first. Without `actor` the caller's own
/// history is returned; anyone else's requires reviewer.
pub async fn list_by_actor(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AuditParams>,
) -> AppResult<impl IntoResponse> {
    let actor = params
        .actor
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| auth.email.clone());

    if normalize_email(&actor) != normalize_email(&auth.email) {
        require_role(auth.role, Role::Reviewer)?;
    }

    let records = AuditLogRepo::list_by_actor(&state.pool, &actor, params.limit).await?;
    Ok(Json(DataResponse { data: records }))
}
