//! Route definitions for FAQ categories and tags.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{category, tag};
use crate::state::AppState;

/// Routes merged into `/admin`.
///
/// ```text
/// GET    /categories          -> list_categories
/// POST   /categories          -> create_category
/// PUT    /categories/{id}     -> update_category
/// DELETE /categories/{id}     -> delete_category
/// GET    /tags                -> list_tags
/// POST   /tags                -> create_tag
/// DELETE /tags/{id}           -> delete_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/categories/{id}",
            put(category::update_category).delete(category::delete_category),
        )
        .route("/tags", get(tag::list_tags).post(tag::create_tag))
        .route("/tags/{id}", delete(tag::delete_tag))
}
