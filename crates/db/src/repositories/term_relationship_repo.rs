//! Repository for the `glossary_term_relationships` table.
//!
//! Edges are directed: `term -> related_term`. A term may list a related term
//! that does not list it back.

use sqlx::{PgConnection, PgPool};
use faircms_core::glossary::GLOSSARY_STATUS_PUBLISHED;
use faircms_core::types::DbId;

use crate::models::glossary::RelatedTerm;

pub struct TermRelationshipRepo;

impl TermRelationshipRepo {
    /// Outgoing related terms of any status, alphabetical.
    pub async fn list_related(pool: &PgPool, term_id: DbId) -> Result<Vec<RelatedTerm>, sqlx::Error> {
        sqlx::query_as::<_, RelatedTerm>(
            "SELECT g.id, g.term, g.slug, g.short_definition \
             FROM glossary_term_relationships r \
             JOIN glossary_terms g ON g.id = r.related_term_id \
             WHERE r.term_id = $1 \
             ORDER BY g.term",
        )
        .bind(term_id)
        .fetch_all(pool)
        .await
    }

    /// Outgoing related terms that are published, alphabetical.
    pub async fn list_related_published(
        pool: &PgPool,
        term_id: DbId,
    ) -> Result<Vec<RelatedTerm>, sqlx::Error> {
        sqlx::query_as::<_, RelatedTerm>(
            "SELECT g.id, g.term, g.slug, g.short_definition \
             FROM glossary_term_relationships r \
             JOIN glossary_terms g ON g.id = r.related_term_id \
             WHERE r.term_id = $1 AND g.status = $2 \
             ORDER BY g.term",
        )
        .bind(term_id)
        .bind(GLOSSARY_STATUS_PUBLISHED)
        .fetch_all(pool)
        .await
    }

    /// Replace a term's outgoing edges inside the caller's transaction.
    ///
    /// Incoming edges from other terms are untouched. An empty slice clears
    /// every outgoing edge.
    pub async fn replace_for_term(
        conn: &mut PgConnection,
        term_id: DbId,
        related_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM glossary_term_relationships WHERE term_id = $1")
            .bind(term_id)
            .execute(&mut *conn)
            .await?;

        if !related_ids.is_empty() {
            sqlx::query(
                "INSERT INTO glossary_term_relationships (term_id, related_term_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT (term_id, related_term_id) DO NOTHING",
            )
            .bind(term_id)
            .bind(related_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Replace a term's outgoing edges atomically.
    ///
    /// Returns `false` if the term does not exist.
    pub async fn set_related(
        pool: &PgPool,
        term_id: DbId,
        related_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM glossary_terms WHERE id = $1 FOR UPDATE")
                .bind(term_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        Self::replace_for_term(&mut *tx, term_id, related_ids).await?;
        tx.commit().await?;
        Ok(true)
    }
}
