//! Read access to the `faq_versions` table.
//!
//! Versions are written only by [`crate::workflow::FaqWorkflow`], which owns
//! every status transition. This repository has no mutating methods.

use sqlx::PgPool;
use faircms_core::types::DbId;

use crate::models::faq_version::FaqVersion;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, entry_id, version_number, question, answer, \
    search_keywords, status, rejection_note, author_email, reviewer_email, \
    published_at, created_at, updated_at";

pub struct FaqVersionRepo;

impl FaqVersionRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FaqVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_versions WHERE id = $1");
        sqlx::query_as::<_, FaqVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All versions of an entry, newest version number first.
    pub async fn list_by_entry(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Vec<FaqVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_versions \
             WHERE entry_id = $1 \
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, FaqVersion>(&query)
            .bind(entry_id)
            .fetch_all(pool)
            .await
    }

    /// The highest-numbered version of an entry, whatever its status.
    pub async fn find_latest(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Option<FaqVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_versions \
             WHERE entry_id = $1 \
             ORDER BY version_number DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, FaqVersion>(&query)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }

    /// The version the entry's live pointer references, if any.
    pub async fn find_live(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Option<FaqVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_versions \
             WHERE id = (SELECT live_version_id FROM faq_entries WHERE id = $1)"
        );
        sqlx::query_as::<_, FaqVersion>(&query)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }
}
