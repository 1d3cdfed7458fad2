//! Repository for the `glossary_terms` table.
//!
//! Terms are single records with a direct `draft <-> published` status flip.
//! Unlike FAQ entries there is no version history and no review gate.

use sqlx::PgPool;
use faircms_core::glossary::GLOSSARY_STATUS_PUBLISHED;
use faircms_core::types::DbId;

use crate::models::glossary::{
    CreateGlossaryTerm, GlossaryFilter, GlossaryTerm, GlossaryTermDetail, TermsIndexRow,
    UpdateGlossaryTerm,
};
use crate::repositories::{like_pattern, GlossaryCategoryRepo, TermRelationshipRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, term, slug, short_definition, long_definition, abbreviation, \
    acronym_expansion, alternate_names, category_id, example_usage, status, \
    created_by, created_at, updated_at";

const LIST_WHERE: &str = "\
    WHERE ($1::TEXT IS NULL OR status = $1) \
      AND ($2::BIGINT IS NULL OR category_id = $2) \
      AND ($3::TEXT IS NULL OR term ILIKE $3)";

pub struct GlossaryTermRepo;

impl GlossaryTermRepo {
    /// Insert a draft term and its outgoing relationships in one transaction.
    ///
    /// `input` must already be validated; `slug` is the resolved slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGlossaryTerm,
        slug: &str,
        created_by: &str,
    ) -> Result<GlossaryTerm, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO glossary_terms \
                (term, slug, short_definition, long_definition, abbreviation, \
                 acronym_expansion, alternate_names, category_id, example_usage, status, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, '{{}}'::TEXT[]), $8, $9, 'draft', $10) \
             RETURNING {COLUMNS}"
        );
        let term = sqlx::query_as::<_, GlossaryTerm>(&query)
            .bind(&input.term)
            .bind(slug)
            .bind(&input.short_definition)
            .bind(&input.long_definition)
            .bind(&input.abbreviation)
            .bind(&input.acronym_expansion)
            .bind(&input.alternate_names)
            .bind(input.category_id)
            .bind(&input.example_usage)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(related) = &input.related_term_ids {
            TermRelationshipRepo::replace_for_term(&mut *tx, term.id, related).await?;
        }

        tx.commit().await?;
        Ok(term)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GlossaryTerm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM glossary_terms WHERE id = $1");
        sqlx::query_as::<_, GlossaryTerm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published term by slug. Drafts are invisible here.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<GlossaryTerm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM glossary_terms WHERE slug = $1 AND status = $2");
        sqlx::query_as::<_, GlossaryTerm>(&query)
            .bind(slug)
            .bind(GLOSSARY_STATUS_PUBLISHED)
            .fetch_optional(pool)
            .await
    }

    /// Attach the category and outgoing related terms to a term.
    pub async fn with_relations(
        pool: &PgPool,
        term: GlossaryTerm,
    ) -> Result<GlossaryTermDetail, sqlx::Error> {
        let category = match term.category_id {
            Some(id) => GlossaryCategoryRepo::find_by_id(pool, id).await?,
            None => None,
        };
        let related_terms = TermRelationshipRepo::list_related(pool, term.id).await?;
        Ok(GlossaryTermDetail {
            term,
            category,
            related_terms,
        })
    }

    /// Public detail by slug: published only, with category and related terms.
    pub async fn get_published_detail(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<GlossaryTermDetail>, sqlx::Error> {
        let Some(term) = Self::find_published_by_slug(pool, slug).await? else {
            return Ok(None);
        };
        let category = match term.category_id {
            Some(id) => GlossaryCategoryRepo::find_by_id(pool, id).await?,
            None => None,
        };
        // Draft targets stay hidden even when a published term links to them.
        let related_terms = TermRelationshipRepo::list_related_published(pool, term.id).await?;
        Ok(Some(GlossaryTermDetail {
            term,
            category,
            related_terms,
        }))
    }

    /// Editorial detail by id, any status.
    pub async fn get_detail(pool: &PgPool, id: DbId) -> Result<Option<GlossaryTermDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(term) => Ok(Some(Self::with_relations(pool, term).await?)),
            None => Ok(None),
        }
    }

    /// All published terms in alphabetical order.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<GlossaryTerm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM glossary_terms WHERE status = $1 ORDER BY term"
        );
        sqlx::query_as::<_, GlossaryTerm>(&query)
            .bind(GLOSSARY_STATUS_PUBLISHED)
            .fetch_all(pool)
            .await
    }

    /// Editorial listing with optional filters, alphabetical, paginated.
    pub async fn list_all(
        pool: &PgPool,
        filter: &GlossaryFilter,
    ) -> Result<(Vec<GlossaryTerm>, i64), sqlx::Error> {
        let status = filter.status.map(|s| s.as_str());
        let search = like_pattern(filter.search.as_deref());

        let query = format!(
            "SELECT {COLUMNS} FROM glossary_terms {LIST_WHERE} \
             ORDER BY term \
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, GlossaryTerm>(&query)
            .bind(status)
            .bind(filter.category_id)
            .bind(search.as_deref())
            .bind(filter.page.limit)
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM glossary_terms {LIST_WHERE}"))
                .bind(status)
                .bind(filter.category_id)
                .bind(search.as_deref())
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// Source rows for the tooltip terms index (published terms only).
    pub async fn list_index_sources(pool: &PgPool) -> Result<Vec<TermsIndexRow>, sqlx::Error> {
        sqlx::query_as::<_, TermsIndexRow>(
            "SELECT term, slug, short_definition, abbreviation, alternate_names \
             FROM glossary_terms WHERE status = $1 ORDER BY term",
        )
        .bind(GLOSSARY_STATUS_PUBLISHED)
        .fetch_all(pool)
        .await
    }

    /// Partial update. `status` flips the term directly; `related_term_ids`,
    /// when present, replaces the outgoing relationships in the same transaction.
    ///
    /// Returns `None` if no term with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGlossaryTerm,
    ) -> Result<Option<GlossaryTerm>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE glossary_terms SET \
                term = COALESCE($2, term), \
                slug = COALESCE($3, slug), \
                short_definition = COALESCE($4, short_definition), \
                long_definition = COALESCE($5, long_definition), \
                abbreviation = COALESCE($6, abbreviation), \
                acronym_expansion = COALESCE($7, acronym_expansion), \
                alternate_names = COALESCE($8, alternate_names), \
                category_id = COALESCE($9, category_id), \
                example_usage = COALESCE($10, example_usage), \
                status = COALESCE($11, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let term = sqlx::query_as::<_, GlossaryTerm>(&query)
            .bind(id)
            .bind(&input.term)
            .bind(&input.slug)
            .bind(&input.short_definition)
            .bind(&input.long_definition)
            .bind(&input.abbreviation)
            .bind(&input.acronym_expansion)
            .bind(&input.alternate_names)
            .bind(input.category_id)
            .bind(&input.example_usage)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(term) = term else {
            return Ok(None);
        };

        if let Some(related) = &input.related_term_ids {
            TermRelationshipRepo::replace_for_term(&mut *tx, id, related).await?;
        }

        tx.commit().await?;
        Ok(Some(term))
    }

    /// Delete a term. Its relationships in both directions cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM glossary_terms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
