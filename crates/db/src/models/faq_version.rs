//! FAQ version model and DTO.

use faircms_core::types::{DbId, Timestamp};
use faircms_core::workflow::VersionStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `faq_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaqVersion {
    pub id: DbId,
    pub entry_id: DbId,
    pub version_number: i32,
    pub question: String,
    pub answer: String,
    pub search_keywords: Option<String>,
    pub status: String,
    pub rejection_note: Option<String>,
    pub author_email: String,
    pub reviewer_email: Option<String>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FaqVersion {
    /// Parse the stored status. The column is CHECK-constrained, so this only
    /// fails if the schema and the code disagree.
    pub fn status(&self) -> Result<VersionStatus, faircms_core::error::CoreError> {
        self.status.parse()
    }

    /// A draft that carries a reviewer's rejection note.
    pub fn is_rejected(&self) -> bool {
        self.status == faircms_core::workflow::STATUS_DRAFT && self.rejection_note.is_some()
    }
}

/// DTO for creating a new version of an existing entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaqVersion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub search_keywords: Option<String>,
}

/// Request body for rejecting a version.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectVersion {
    pub note: Option<String>,
}
