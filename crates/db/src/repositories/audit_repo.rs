//! Repository for the `faq_audit_log` table.
//!
//! Insert-only. There is no update or delete method, and the table's trigger
//! refuses both at the database level.

use sqlx::{PgConnection, PgPool};
use faircms_core::types::DbId;

use crate::models::audit::{AuditLogEntry, CreateAuditLogEntry};

const COLUMNS: &str = "id, entry_id, version_id, action, actor_email, details, created_at";

/// Default number of records returned by an actor-scoped query.
pub const DEFAULT_ACTOR_LIMIT: i64 = 100;

pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append a record inside the caller's transaction, so the record commits
    /// or rolls back together with the transition it describes.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateAuditLogEntry,
    ) -> Result<AuditLogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO faq_audit_log (entry_id, version_id, action, actor_email, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(input.entry_id)
            .bind(input.version_id)
            .bind(input.action.as_str())
            .bind(&input.actor_email)
            .bind(&input.details)
            .fetch_one(conn)
            .await
    }

    /// History of one entry, newest first.
    pub async fn list_by_entry(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_audit_log \
             WHERE entry_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(entry_id)
            .fetch_all(pool)
            .await
    }

    /// Everything one actor did, newest first. The email match is case-insensitive.
    pub async fn list_by_actor(
        pool: &PgPool,
        actor_email: &str,
        limit: Option<i64>,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_ACTOR_LIMIT).clamp(1, 500);
        let query = format!(
            "SELECT {COLUMNS} FROM faq_audit_log \
             WHERE LOWER(actor_email) = LOWER($1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(actor_email.trim())
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
