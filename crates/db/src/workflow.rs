//! Transactional FAQ approval workflow.
//!
//! Every operation here runs in a single transaction: the status change, the
//! live-pointer move and the audit record commit together or not at all.
//!
//! Transitions are conditional updates (`... WHERE status = <expected>`), so
//! two concurrent approvals of the same version cannot both succeed. When the
//! update matches no row the version is re-read inside the same transaction to
//! report `NotFound` or `InvalidTransition` precisely.
//!
//! Lock order is always entry row, then version rows. Transitions lock the
//! owning entry before updating the version; `delete_entry` locks the entry
//! before its cascade reaches the versions.
//!
//! Side effects (notifications, cache invalidation, search indexing) are not
//! performed here. Callers run them after a successful return.

use sqlx::{PgConnection, PgPool};

use faircms_core::audit::{self, AuditAction};
use faircms_core::error::CoreError;
use faircms_core::faq::validate_version_content;
use faircms_core::sanitize::sanitize_html;
use faircms_core::slug::resolve_slug;
use faircms_core::types::DbId;
use faircms_core::workflow::{
    check_separation_of_duties, check_transition, validate_rejection_note, Transition,
    VersionStatus,
};

use crate::models::audit::CreateAuditLogEntry;
use crate::models::faq_entry::{CreateFaqEntry, FaqEntry};
use crate::models::faq_version::{CreateFaqVersion, FaqVersion};
use crate::repositories::faq_version_repo::COLUMNS as VERSION_COLUMNS;
use crate::repositories::{AuditLogRepo, TagRepo};

const ENTRY_COLUMNS: &str = "id, slug, category_id, live_version_id, is_featured, sort_order, \
    created_by, created_at, updated_at";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign-key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a workflow operation.
///
/// `Core` carries every expected outcome (validation, not-found, invalid
/// transition, self-approval, conflict). `Database` means the store itself
/// failed; the transaction has been rolled back.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for WorkflowError {
    /// Constraint violations are user-correctable and surface as domain errors.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return Self::Core(CoreError::Conflict(format!(
                        "Duplicate value violates unique constraint '{constraint}'"
                    )));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return Self::Core(CoreError::Validation(format!(
                        "Referenced record does not exist ({constraint})"
                    )));
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of [`FaqWorkflow::create`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct CreatedEntry {
    pub entry: FaqEntry,
    pub version: FaqVersion,
}

/// Result of [`FaqWorkflow::approve`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApprovedVersion {
    pub version: FaqVersion,
    pub entry: FaqEntry,
    /// The version that was live before this approval, if any.
    pub previous_live_version_id: Option<DbId>,
}

/// Result of [`FaqWorkflow::delete_entry`], captured before removal.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeletedEntry {
    pub id: DbId,
    pub slug: String,
    pub was_live: bool,
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// The FAQ version state machine applied against the database.
pub struct FaqWorkflow;

impl FaqWorkflow {
    /// Create an entry and its version 1 in `draft`, with an optional tag set.
    ///
    /// Appends a `created` audit record.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFaqEntry,
        actor: &str,
    ) -> Result<CreatedEntry, WorkflowError> {
        let content = validate_version_content(
            Some(input.question.as_str()),
            Some(input.answer.as_str()),
            input.search_keywords.as_deref(),
        )?;
        let slug = resolve_slug(input.slug.as_deref(), &content.question)?;
        let answer = sanitize_html(&content.answer);

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO faq_entries (slug, category_id, is_featured, sort_order, created_by) \
             VALUES ($1, $2, COALESCE($3, false), COALESCE($4, 0), $5) \
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, FaqEntry>(&query)
            .bind(&slug)
            .bind(input.category_id)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO faq_versions \
                (entry_id, version_number, question, answer, search_keywords, status, author_email) \
             VALUES ($1, 1, $2, $3, $4, 'draft', $5) \
             RETURNING {VERSION_COLUMNS}"
        );
        let version = sqlx::query_as::<_, FaqVersion>(&query)
            .bind(entry.id)
            .bind(&content.question)
            .bind(&answer)
            .bind(&content.search_keywords)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(tag_ids) = &input.tag_ids {
            TagRepo::replace_for_entry(&mut *tx, entry.id, tag_ids).await?;
        }

        append_audit(
            &mut *tx,
            entry.id,
            Some(version.id),
            AuditAction::Created,
            actor,
            Some(audit::version_details(version.version_number)),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(entry_id = entry.id, version_id = version.id, actor, "FAQ entry created");
        Ok(CreatedEntry { entry, version })
    }

    /// Add a new `draft` version to an existing entry.
    ///
    /// The version number is `max(existing) + 1`, computed while holding a row
    /// lock on the entry so concurrent calls cannot collide. The live version
    /// is untouched. Appends an `updated` audit record.
    pub async fn create_new_version(
        pool: &PgPool,
        entry_id: DbId,
        input: &CreateFaqVersion,
        actor: &str,
    ) -> Result<FaqVersion, WorkflowError> {
        let content = validate_version_content(
            Some(input.question.as_str()),
            Some(input.answer.as_str()),
            input.search_keywords.as_deref(),
        )?;
        let answer = sanitize_html(&content.answer);

        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM faq_entries WHERE id = $1 FOR UPDATE")
                .bind(entry_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(CoreError::NotFound {
                entity: "FaqEntry",
                id: entry_id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO faq_versions \
                (entry_id, version_number, question, answer, search_keywords, status, author_email) \
             VALUES ( \
                $1, \
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM faq_versions WHERE entry_id = $1), \
                $2, $3, $4, 'draft', $5) \
             RETURNING {VERSION_COLUMNS}"
        );
        let version = sqlx::query_as::<_, FaqVersion>(&query)
            .bind(entry_id)
            .bind(&content.question)
            .bind(&answer)
            .bind(&content.search_keywords)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE faq_entries SET updated_at = NOW() WHERE id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;

        append_audit(
            &mut *tx,
            entry_id,
            Some(version.id),
            AuditAction::Updated,
            actor,
            Some(audit::version_details(version.version_number)),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            entry_id,
            version_id = version.id,
            version_number = version.version_number,
            actor,
            "FAQ version created",
        );
        Ok(version)
    }

    /// `draft -> pending_review`. Appends a `submitted` audit record.
    pub async fn submit_for_review(
        pool: &PgPool,
        version_id: DbId,
        actor: &str,
    ) -> Result<FaqVersion, WorkflowError> {
        let mut tx = pool.begin().await?;
        lock_owning_entry(&mut *tx, version_id).await?;

        let query = format!(
            "UPDATE faq_versions SET status = $2 \
             WHERE id = $1 AND status = $3 \
             RETURNING {VERSION_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, FaqVersion>(&query)
            .bind(version_id)
            .bind(Transition::Submit.target_status().as_str())
            .bind(Transition::Submit.required_status().as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let version = match updated {
            Some(v) => v,
            None => return Err(explain_no_match(&mut *tx, version_id, Transition::Submit, None).await),
        };

        append_audit(
            &mut *tx,
            version.entry_id,
            Some(version.id),
            AuditAction::Submitted,
            actor,
            None,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            entry_id = version.entry_id,
            version_id = version.id,
            actor,
            "FAQ version submitted for review",
        );
        Ok(version)
    }

    /// `pending_review -> published`, repointing the entry's live version.
    ///
    /// Fails with [`CoreError::SelfApproval`] when the reviewer authored the
    /// version, whatever the reviewer's role. The guard is part of the
    /// conditional update itself, not only a prior read. Appends an
    /// `approved` audit record.
    pub async fn approve(
        pool: &PgPool,
        version_id: DbId,
        reviewer: &str,
    ) -> Result<ApprovedVersion, WorkflowError> {
        let mut tx = pool.begin().await?;
        let entry_id = lock_owning_entry(&mut *tx, version_id).await?;

        let query = format!(
            "UPDATE faq_versions SET \
                status = $2, \
                reviewer_email = $4, \
                published_at = NOW() \
             WHERE id = $1 AND status = $3 \
               AND LOWER(TRIM(author_email)) <> LOWER(TRIM($4)) \
             RETURNING {VERSION_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, FaqVersion>(&query)
            .bind(version_id)
            .bind(Transition::Approve.target_status().as_str())
            .bind(Transition::Approve.required_status().as_str())
            .bind(reviewer)
            .fetch_optional(&mut *tx)
            .await?;

        let version = match updated {
            Some(v) => v,
            None => {
                return Err(
                    explain_no_match(&mut *tx, version_id, Transition::Approve, Some(reviewer)).await,
                )
            }
        };

        let previous_live_version_id: Option<DbId> =
            sqlx::query_scalar("SELECT live_version_id FROM faq_entries WHERE id = $1")
                .bind(entry_id)
                .fetch_one(&mut *tx)
                .await?;

        let query = format!(
            "UPDATE faq_entries SET live_version_id = $2 \
             WHERE id = $1 \
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, FaqEntry>(&query)
            .bind(version.entry_id)
            .bind(version.id)
            .fetch_one(&mut *tx)
            .await?;

        append_audit(
            &mut *tx,
            version.entry_id,
            Some(version.id),
            AuditAction::Approved,
            reviewer,
            Some(audit::approval_details(
                version.version_number,
                previous_live_version_id,
            )),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            entry_id = entry.id,
            version_id = version.id,
            actor = reviewer,
            ?previous_live_version_id,
            "FAQ version approved and published",
        );
        Ok(ApprovedVersion {
            version,
            entry,
            previous_live_version_id,
        })
    }

    /// `pending_review -> draft`, storing the reviewer and the rejection note.
    ///
    /// The note is required. Public content is unchanged. Appends a
    /// `rejected` audit record carrying the note.
    pub async fn reject(
        pool: &PgPool,
        version_id: DbId,
        reviewer: &str,
        note: Option<&str>,
    ) -> Result<FaqVersion, WorkflowError> {
        let note = validate_rejection_note(note)?;

        let mut tx = pool.begin().await?;
        lock_owning_entry(&mut *tx, version_id).await?;

        let query = format!(
            "UPDATE faq_versions SET \
                status = $2, \
                rejection_note = $4, \
                reviewer_email = $5 \
             WHERE id = $1 AND status = $3 \
             RETURNING {VERSION_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, FaqVersion>(&query)
            .bind(version_id)
            .bind(Transition::Reject.target_status().as_str())
            .bind(Transition::Reject.required_status().as_str())
            .bind(note)
            .bind(reviewer)
            .fetch_optional(&mut *tx)
            .await?;

        let version = match updated {
            Some(v) => v,
            None => return Err(explain_no_match(&mut *tx, version_id, Transition::Reject, None).await),
        };

        append_audit(
            &mut *tx,
            version.entry_id,
            Some(version.id),
            AuditAction::Rejected,
            reviewer,
            Some(audit::rejection_details(note)),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            entry_id = version.entry_id,
            version_id = version.id,
            actor = reviewer,
            "FAQ version rejected",
        );
        Ok(version)
    }

    /// Delete an entry with all of its versions and tag links.
    ///
    /// A `deleted` audit record referencing the entry is written first, in the
    /// same transaction, and outlives the entry.
    pub async fn delete_entry(
        pool: &PgPool,
        entry_id: DbId,
        actor: &str,
    ) -> Result<DeletedEntry, WorkflowError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {ENTRY_COLUMNS} FROM faq_entries WHERE id = $1 FOR UPDATE");
        let entry = sqlx::query_as::<_, FaqEntry>(&query)
            .bind(entry_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "FaqEntry",
                id: entry_id,
            })?;

        append_audit(
            &mut *tx,
            entry.id,
            None,
            AuditAction::Deleted,
            actor,
            Some(audit::deletion_details(&entry.slug, entry.live_version_id)),
        )
        .await?;

        // Drop the live pointer first so the version cascade never has to
        // touch the row being deleted.
        sqlx::query("UPDATE faq_entries SET live_version_id = NULL WHERE id = $1")
            .bind(entry.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM faq_entries WHERE id = $1")
            .bind(entry.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(entry_id = entry.id, slug = %entry.slug, actor, "FAQ entry deleted");
        Ok(DeletedEntry {
            id: entry.id,
            slug: entry.slug,
            was_live: entry.live_version_id.is_some(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn append_audit(
    conn: &mut PgConnection,
    entry_id: DbId,
    version_id: Option<DbId>,
    action: AuditAction,
    actor: &str,
    details: Option<serde_json::Value>,
) -> Result<(), sqlx::Error> {
    AuditLogRepo::insert(
        conn,
        &CreateAuditLogEntry {
            entry_id: Some(entry_id),
            version_id,
            action,
            actor_email: actor.to_string(),
            details,
        },
    )
    .await?;
    Ok(())
}

/// Lock the entry that owns `version_id` and return its id.
///
/// If the entry is deleted while this waits, the row drops out of the join
/// and the version is reported missing.
async fn lock_owning_entry(conn: &mut PgConnection, version_id: DbId) -> Result<DbId, WorkflowError> {
    let entry_id: Option<DbId> = sqlx::query_scalar(
        "SELECT e.id FROM faq_entries e \
         JOIN faq_versions v ON v.entry_id = e.id \
         WHERE v.id = $1 \
         FOR UPDATE OF e",
    )
    .bind(version_id)
    .fetch_optional(&mut *conn)
    .await?;

    entry_id.ok_or_else(|| {
        CoreError::NotFound {
            entity: "FaqVersion",
            id: version_id,
        }
        .into()
    })
}

/// Work out why a conditional transition matched no row.
///
/// Runs inside the failed transition's transaction; the caller drops the
/// transaction afterwards, rolling it back.
async fn explain_no_match(
    conn: &mut PgConnection,
    version_id: DbId,
    transition: Transition,
    reviewer: Option<&str>,
) -> WorkflowError {
    let row: Result<Option<(String, String)>, sqlx::Error> =
        sqlx::query_as("SELECT status, author_email FROM faq_versions WHERE id = $1")
            .bind(version_id)
            .fetch_optional(&mut *conn)
            .await;

    let (status, author) = match row {
        Ok(Some(row)) => row,
        Ok(None) => {
            return CoreError::NotFound {
                entity: "FaqVersion",
                id: version_id,
            }
            .into()
        }
        Err(e) => return e.into(),
    };

    let current: VersionStatus = match status.parse() {
        Ok(s) => s,
        Err(e) => return WorkflowError::Core(e),
    };

    if let Err(e) = check_transition(current, transition) {
        return e.into();
    }
    if let Some(reviewer) = reviewer {
        if let Err(e) = check_separation_of_duties(&author, reviewer) {
            return e.into();
        }
    }

    // The row matched on re-read, so another transaction changed it between
    // the update and the re-read.
    CoreError::Conflict(format!(
        "Version {version_id} was modified concurrently; reload and retry"
    ))
    .into()
}
