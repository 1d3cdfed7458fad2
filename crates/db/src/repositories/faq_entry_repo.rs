//! Repository for the `faq_entries` table and its public/editorial projections.
//!
//! The public side only ever sees content through `live_version_id`. Drafts,
//! pending versions and rejected edits are invisible to every public query.

use sqlx::PgPool;
use faircms_core::types::DbId;

use crate::models::category::Category;
use crate::models::faq_entry::{
    EditorialFaq, EditorialFaqFilter, FaqEntry, FaqEntryDetail, PublicFaq, PublicFaqFilter,
    PublishedFaq, UpdateFaqEntry,
};
use crate::repositories::{like_pattern, CategoryRepo, FaqVersionRepo, TagRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, category_id, live_version_id, is_featured, sort_order, \
    created_by, created_at, updated_at";

/// FROM/WHERE shared by the public page query and its count, so the total
/// always honours the same filters as the page.
const PUBLIC_FROM: &str = "\
    FROM faq_entries e \
    JOIN faq_versions v ON v.id = e.live_version_id AND v.status = 'published' \
    LEFT JOIN faq_categories c ON c.id = e.category_id \
    WHERE ($1::TEXT IS NULL OR c.slug = $1) \
      AND ($2::TEXT IS NULL OR EXISTS ( \
            SELECT 1 FROM faq_entry_tags et \
            JOIN faq_tags t ON t.id = et.tag_id \
            WHERE et.entry_id = e.id AND t.slug = $2))";

/// FROM/WHERE shared by the editorial page query and its count. Each entry is
/// joined to its highest-numbered version.
const EDITORIAL_FROM: &str = "\
    FROM faq_entries e \
    JOIN LATERAL ( \
        SELECT * FROM faq_versions fv \
        WHERE fv.entry_id = e.id \
        ORDER BY fv.version_number DESC \
        LIMIT 1) v ON true \
    LEFT JOIN faq_categories c ON c.id = e.category_id \
    WHERE ($1::TEXT IS NULL OR v.status = $1) \
      AND (NOT $2::BOOLEAN OR v.rejection_note IS NOT NULL) \
      AND ($3::BIGINT IS NULL OR e.category_id = $3) \
      AND ($4::TEXT IS NULL OR v.question ILIKE $4)";

pub struct FaqEntryRepo;

impl FaqEntryRepo {
    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FaqEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_entries WHERE id = $1");
        sqlx::query_as::<_, FaqEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<FaqEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_entries WHERE slug = $1");
        sqlx::query_as::<_, FaqEntry>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Editorial detail: entry, tags, every version and the latest one.
    pub async fn get_detail(pool: &PgPool, id: DbId) -> Result<Option<FaqEntryDetail>, sqlx::Error> {
        let Some(entry) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let tags = TagRepo::list_for_entry(pool, id).await?;
        let versions = FaqVersionRepo::list_by_entry(pool, id).await?;
        let latest_version = versions.first().cloned();
        Ok(Some(FaqEntryDetail {
            entry,
            tags,
            versions,
            latest_version,
        }))
    }

    // -----------------------------------------------------------------------
    // Metadata
    // -----------------------------------------------------------------------

    /// Update entry metadata and, when `tag_ids` is present, replace the tag set.
    ///
    /// Both happen in one transaction. Returns `None` if the entry does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaqEntry,
    ) -> Result<Option<FaqEntry>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE faq_entries SET \
                slug = COALESCE($2, slug), \
                category_id = COALESCE($3, category_id), \
                is_featured = COALESCE($4, is_featured), \
                sort_order = COALESCE($5, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, FaqEntry>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(input.category_id)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(entry) = entry else {
            return Ok(None);
        };

        if let Some(tag_ids) = &input.tag_ids {
            TagRepo::replace_for_entry(&mut *tx, id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(entry))
    }

    // -----------------------------------------------------------------------
    // Public projections
    // -----------------------------------------------------------------------

    /// One page of published entries, featured first then by sort order,
    /// with the total count under the same filters.
    pub async fn list_published(
        pool: &PgPool,
        filter: &PublicFaqFilter,
    ) -> Result<(Vec<PublishedFaq>, i64), sqlx::Error> {
        let query = format!(
            "SELECT e.id, e.slug, v.question, v.answer, e.category_id, \
                    c.name AS category_name, c.slug AS category_slug, \
                    e.is_featured, e.sort_order, v.updated_at \
             {PUBLIC_FROM} \
             ORDER BY e.is_featured DESC, e.sort_order ASC, e.id ASC \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, PublishedFaq>(&query)
            .bind(filter.category_slug.as_deref())
            .bind(filter.tag_slug.as_deref())
            .bind(filter.page.limit)
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {PUBLIC_FROM}"))
            .bind(filter.category_slug.as_deref())
            .bind(filter.tag_slug.as_deref())
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Public detail by slug. `None` unless the entry has a live version.
    pub async fn get_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PublicFaq>, sqlx::Error> {
        let Some(entry) = Self::find_by_slug(pool, slug).await? else {
            return Ok(None);
        };
        let Some(live) = FaqVersionRepo::find_live(pool, entry.id).await? else {
            return Ok(None);
        };
        if live.status != faircms_core::workflow::STATUS_PUBLISHED {
            tracing::error!(
                entry_id = entry.id,
                version_id = live.id,
                status = %live.status,
                "Live pointer references a non-published version",
            );
            return Ok(None);
        }

        let category: Option<Category> = match entry.category_id {
            Some(id) => CategoryRepo::find_by_id(pool, id).await?,
            None => None,
        };
        let tags = TagRepo::list_for_entry(pool, entry.id).await?;

        Ok(Some(PublicFaq {
            slug: entry.slug,
            question: live.question,
            answer: live.answer,
            category,
            tags,
            is_featured: entry.is_featured,
            updated_at: live.updated_at,
        }))
    }

    // -----------------------------------------------------------------------
    // Editorial projections
    // -----------------------------------------------------------------------

    /// One page of entries joined to their latest version, regardless of
    /// publish status, most recently touched first.
    pub async fn list_all(
        pool: &PgPool,
        filter: &EditorialFaqFilter,
    ) -> Result<(Vec<EditorialFaq>, i64), sqlx::Error> {
        let status = filter.status.map(|s| s.stored_status().as_str());
        let rejected_only = filter.status.is_some_and(|s| s.requires_rejection_note());
        let search = like_pattern(filter.search.as_deref());

        let query = format!(
            "SELECT e.id, e.slug, e.category_id, c.name AS category_name, \
                    e.live_version_id, e.is_featured, e.sort_order, e.created_by, e.updated_at, \
                    v.id AS latest_version_id, v.version_number AS latest_version_number, \
                    v.question, v.status, v.rejection_note, v.author_email, \
                    v.updated_at AS version_updated_at \
             {EDITORIAL_FROM} \
             ORDER BY v.updated_at DESC, e.id DESC \
             LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, EditorialFaq>(&query)
            .bind(status)
            .bind(rejected_only)
            .bind(filter.category_id)
            .bind(search.as_deref())
            .bind(filter.page.limit)
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {EDITORIAL_FROM}"))
            .bind(status)
            .bind(rejected_only)
            .bind(filter.category_id)
            .bind(search.as_deref())
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }
}
