//! FAQ tag model and DTO.

use faircms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `faq_tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag. The slug is derived from `name` when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
}

/// Request body for replacing an entry's tag set.
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryTags {
    pub tag_ids: Vec<DbId>,
}
