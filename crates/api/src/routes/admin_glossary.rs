//! Route definitions for editorial glossary management.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{category, glossary};
use crate::state::AppState;

/// Routes mounted at `/admin/glossary`.
///
/// ```text
/// GET    /                    -> list_terms
/// POST   /                    -> create_term
/// GET    /categories          -> list_glossary_categories
/// POST   /categories          -> create_glossary_category
/// DELETE /categories/{id}     -> delete_glossary_category
/// GET    /{id}                -> get_term
/// PUT    /{id}                -> update_term
/// DELETE /{id}                -> delete_term
/// PUT    /{id}/related        -> set_related
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(glossary::list_terms).post(glossary::create_term))
        .route(
            "/categories",
            get(category::list_glossary_categories).post(category::create_glossary_category),
        )
        .route("/categories/{id}", delete(category::delete_glossary_category))
        .route(
            "/{id}",
            get(glossary::get_term)
                .put(glossary::update_term)
                .delete(glossary::delete_term),
        )
        .route("/{id}/related", put(glossary::set_related))
}
