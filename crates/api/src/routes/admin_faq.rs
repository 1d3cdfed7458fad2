//! Route definitions for editorial FAQ management.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::faq;
use crate::state::AppState;

/// Routes mounted at `/admin/faq`.
///
/// ```text
/// GET    /                        -> list_faqs
/// POST   /                        -> create_faq
/// GET    /{id}                    -> get_faq
/// PUT    /{id}                    -> update_faq
/// DELETE /{id}                    -> delete_faq
/// POST   /{id}/version            -> create_version
/// GET    /{id}/versions           -> list_versions
/// GET    /{id}/audit              -> entry_audit
/// PUT    /{id}/tags               -> set_tags
/// POST   /version/{id}/submit     -> submit_version
/// POST   /version/{id}/approve    -> approve_version
/// POST   /version/{id}/reject     -> reject_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faq::list_faqs).post(faq::create_faq))
        .route(
            "/{id}",
            get(faq::get_faq).put(faq::update_faq).delete(faq::delete_faq),
        )
        .route("/{id}/version", post(faq::create_version))
        .route("/{id}/versions", get(faq::list_versions))
        .route("/{id}/audit", get(faq::entry_audit))
        .route("/{id}/tags", put(faq::set_tags))
        .route("/version/{id}/submit", post(faq::submit_version))
        .route("/version/{id}/approve", post(faq::approve_version))
        .route("/version/{id}/reject", post(faq::reject_version))
}
