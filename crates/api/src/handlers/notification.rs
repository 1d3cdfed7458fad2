//! Handlers for the caller's notification inbox.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever touch
//! notifications addressed to the caller.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use faircms_core::error::CoreError;
use faircms_core::types::DbId;
use faircms_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::NotificationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/notifications
///
/// Newest first, at most 50.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationParams>,
) -> AppResult<impl IntoResponse> {
    let notifications =
        NotificationRepo::list_for_recipient(&state.pool, &auth.email, params.unread_only).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/admin/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(&state.pool, &auth.email).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "count": count }),
    }))
}

/// POST /api/admin/notifications/{id}/read
///
/// 204 on success; 404 if the notification is not the caller's or is
/// already read.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, &auth.email).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_all_read(&state.pool, &auth.email).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "updated": updated }),
    }))
}
