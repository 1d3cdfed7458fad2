//! Repository for the `faq_tags` and `faq_entry_tags` tables.
//!
//! Entry/tag links use replace-all semantics: the caller always passes the
//! complete desired set, and an empty set clears every link.

use sqlx::{PgConnection, PgPool};
use faircms_core::types::DbId;

use crate::models::tag::Tag;

/// Column list for `faq_tags` queries.
const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides CRUD operations for tags and entry/tag links.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    pub async fn create(pool: &PgPool, name: &str, slug: &str) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO faq_tags (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tags ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Delete a tag. Cascade deletes all of its entry links.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faq_tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Entry/tag links
    // -----------------------------------------------------------------------

    /// List the tags linked to an entry, ordered by name.
    pub async fn list_for_entry(pool: &PgPool, entry_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.slug, t.created_at, t.updated_at \
             FROM faq_entry_tags et \
             JOIN faq_tags t ON t.id = et.tag_id \
             WHERE et.entry_id = $1 \
             ORDER BY t.name",
        )
        .bind(entry_id)
        .fetch_all(pool)
        .await
    }

    /// Replace an entry's tag set inside the caller's transaction.
    ///
    /// Duplicate ids in `tag_ids` collapse to a single link. An unknown tag id
    /// fails with a foreign-key violation and the caller's transaction rolls back.
    pub async fn replace_for_entry(
        conn: &mut PgConnection,
        entry_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM faq_entry_tags WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&mut *conn)
            .await?;

        if !tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO faq_entry_tags (entry_id, tag_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT (entry_id, tag_id) DO NOTHING",
            )
            .bind(entry_id)
            .bind(tag_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Replace an entry's tag set atomically.
    ///
    /// Returns `false` if the entry does not exist.
    pub async fn set_for_entry(
        pool: &PgPool,
        entry_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM faq_entries WHERE id = $1 FOR UPDATE")
                .bind(entry_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        Self::replace_for_entry(&mut *tx, entry_id, tag_ids).await?;
        tx.commit().await?;
        Ok(true)
    }
}
