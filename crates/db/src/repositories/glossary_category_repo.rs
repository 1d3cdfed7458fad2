//! Repository for the `glossary_categories` table.

use sqlx::PgPool;
use faircms_core::types::DbId;

use crate::models::category::GlossaryCategory;

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

pub struct GlossaryCategoryRepo;

impl GlossaryCategoryRepo {
    pub async fn create(pool: &PgPool, name: &str, slug: &str) -> Result<GlossaryCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO glossary_categories (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GlossaryCategory>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GlossaryCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM glossary_categories WHERE id = $1");
        sqlx::query_as::<_, GlossaryCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<GlossaryCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM glossary_categories ORDER BY name");
        sqlx::query_as::<_, GlossaryCategory>(&query).fetch_all(pool).await
    }

    /// Hard delete; terms in the category fall back to `category_id = NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM glossary_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
