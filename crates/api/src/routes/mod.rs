pub mod admin_faq;
pub mod admin_glossary;
pub mod health;
pub mod import;
pub mod notification;
pub mod public;
pub mod taxonomy;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /faq                                   public FAQ list
/// /faq/categories                        public category list
/// /faq/{slug}                            public FAQ detail (live version)
/// /glossary                              published terms
/// /glossary/terms-index                  tooltip index
/// /glossary/{slug}                       published term detail
///
/// /admin/faq                             list, create
/// /admin/faq/{id}                        get, update, delete
/// /admin/faq/{id}/version                new version (POST)
/// /admin/faq/{id}/versions               version history
/// /admin/faq/{id}/audit                  entry audit trail
/// /admin/faq/{id}/tags                   replace tags (PUT)
/// /admin/faq/version/{id}/submit         submit for review (POST)
/// /admin/faq/version/{id}/approve        approve (POST, reviewer)
/// /admin/faq/version/{id}/reject         reject (POST, reviewer)
///
/// /admin/audit?actor=                    audit by actor
///
/// /admin/categories                      list, create (admin)
/// /admin/categories/{id}                 update, delete (admin)
/// /admin/tags                            list, create (admin)
/// /admin/tags/{id}                       delete (admin)
///
/// /admin/glossary                        list, create
/// /admin/glossary/{id}                   get, update, delete (reviewer)
/// /admin/glossary/{id}/related           replace related terms (PUT)
/// /admin/glossary/categories             list, create (admin)
/// /admin/glossary/categories/{id}        delete (admin)
///
/// /admin/import/faq                      bulk FAQ import (POST, admin)
/// /admin/import/glossary                 bulk glossary import (POST, admin)
///
/// /admin/notifications                   inbox
/// /admin/notifications/unread-count      unread count
/// /admin/notifications/read-all          mark all read (POST)
/// /admin/notifications/{id}/read         mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin_routes())
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/faq", admin_faq::router())
        .nest("/glossary", admin_glossary::router())
        .nest("/notifications", notification::router())
        .nest("/import", import::router())
        .merge(taxonomy::router())
        .route("/audit", get(handlers::audit::list_by_actor))
}
