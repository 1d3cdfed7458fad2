//! Shared query parameter types for API handlers.

use faircms_core::glossary::GlossaryStatus;
use faircms_core::types::DbId;
use faircms_core::workflow::StatusFilter;
use serde::Deserialize;

/// `GET /api/faq?page=&limit=&category=&tag=`. `category` and `tag` are slugs.
#[derive(Debug, Default, Deserialize)]
pub struct PublicFaqParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// `GET /api/admin/faq?status=&category_id=&search=&page=&limit=`.
///
/// `status` accepts `draft`, `pending_review`, `published` or `rejected`.
#[derive(Debug, Default, Deserialize)]
pub struct EditorialFaqParams {
    pub status: Option<StatusFilter>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /api/admin/glossary?status=&category_id=&search=&page=&limit=`.
#[derive(Debug, Default, Deserialize)]
pub struct GlossaryParams {
    pub status: Option<GlossaryStatus>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /api/admin/audit?actor=&limit=`. `actor` defaults to the caller.
#[derive(Debug, Default, Deserialize)]
pub struct AuditParams {
    pub actor: Option<String>,
    pub limit: Option<i64>,
}

/// `GET /api/admin/notifications?unread_only=`.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationParams {
    #[serde(default)]
    pub unread_only: bool,
}
