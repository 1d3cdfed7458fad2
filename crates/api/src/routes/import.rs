//! Route definitions for bulk import.

use axum::routing::post;
use axum::Router;

use crate::handlers::import;
use crate::state::AppState;

/// Routes nested under `/admin/import`. Admin only.
///
/// ```text
/// POST /faq        -> import_faq
/// POST /glossary   -> import_glossary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/faq", post(import::import_faq))
        .route("/glossary", post(import::import_glossary))
}
