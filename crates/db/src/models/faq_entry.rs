//! FAQ entry model, DTOs and read projections.

use faircms_core::pagination::PageRequest;
use faircms_core::types::{DbId, Timestamp};
use faircms_core::workflow::StatusFilter;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::faq_version::FaqVersion;
use crate::models::tag::Tag;

/// A row from the `faq_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaqEntry {
    pub id: DbId,
    pub slug: String,
    pub category_id: Option<DbId>,
    pub live_version_id: Option<DbId>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an entry together with its first version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaqEntry {
    pub slug: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub search_keywords: Option<String>,
    pub category_id: Option<DbId>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// DTO for updating entry metadata. Content changes go through a new version.
///
/// When `tag_ids` is present the tag set is replaced wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaqEntry {
    pub slug: Option<String>,
    pub category_id: Option<DbId>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub tag_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Public projections
// ---------------------------------------------------------------------------

/// Filters for the public FAQ listing.
#[derive(Debug, Clone, Default)]
pub struct PublicFaqFilter {
    pub category_slug: Option<String>,
    pub tag_slug: Option<String>,
    pub page: PageRequest,
}

/// One row of the public listing: entry metadata joined to its live version.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublishedFaq {
    pub id: DbId,
    pub slug: String,
    pub question: String,
    pub answer: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub updated_at: Timestamp,
}

/// Public detail view, drawn strictly from the live version.
#[derive(Debug, Clone, Serialize)]
pub struct PublicFaq {
    pub slug: String,
    pub question: String,
    pub answer: String,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub is_featured: bool,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Editorial projections
// ---------------------------------------------------------------------------

/// Filters for the editorial FAQ listing.
#[derive(Debug, Clone, Default)]
pub struct EditorialFaqFilter {
    pub status: Option<StatusFilter>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
    pub page: PageRequest,
}

/// One row of the editorial listing: an entry joined to its latest version.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EditorialFaq {
    pub id: DbId,
    pub slug: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub live_version_id: Option<DbId>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_by: String,
    pub updated_at: Timestamp,
    pub latest_version_id: DbId,
    pub latest_version_number: i32,
    pub question: String,
    pub status: String,
    pub rejection_note: Option<String>,
    pub author_email: String,
    pub version_updated_at: Timestamp,
}

/// Editorial detail view: the entry, its full history and the newest version.
#[derive(Debug, Clone, Serialize)]
pub struct FaqEntryDetail {
    pub entry: FaqEntry,
    pub tags: Vec<Tag>,
    pub versions: Vec<FaqVersion>,
    pub latest_version: Option<FaqVersion>,
}
