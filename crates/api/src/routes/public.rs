//! Public read-only routes. No identity required.

use axum::routing::get;
use axum::Router;

use crate::handlers::{public_faq, public_glossary};
use crate::state::AppState;

/// ```text
/// GET /faq                    -> list_faqs
/// GET /faq/categories         -> list_categories
/// GET /faq/{slug}             -> get_faq
/// GET /glossary               -> list_terms
/// GET /glossary/terms-index   -> terms_index
/// GET /glossary/{slug}        -> get_term
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/faq", get(public_faq::list_faqs))
        .route("/faq/categories", get(public_faq::list_categories))
        .route("/faq/{slug}", get(public_faq::get_faq))
        .route("/glossary", get(public_glossary::list_terms))
        .route("/glossary/terms-index", get(public_glossary::terms_index))
        .route("/glossary/{slug}", get(public_glossary::get_term))
}
