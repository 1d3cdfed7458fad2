//! Repository for the `notifications` table.

use sqlx::PgPool;
use faircms_core::notification::INBOX_LIMIT;
use faircms_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, recipient_email, type, title, body, link_url, is_read, read_at, \
    created_at, updated_at";

/// Provides inbox operations for notifications, keyed by recipient email.
pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (recipient_email, type, title, body, link_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.recipient_email)
            .bind(input.notification_type.as_str())
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.link_url)
            .fetch_one(pool)
            .await
    }

    /// List notifications for a recipient, newest first, capped at [`INBOX_LIMIT`].
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient_email: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE LOWER(recipient_email) = LOWER($1) {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(recipient_email)
            .bind(INBOX_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification belongs to the recipient and was
    /// unread, `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        recipient_email: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND LOWER(recipient_email) = LOWER($2) AND is_read = false",
        )
        .bind(notification_id)
        .bind(recipient_email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a recipient.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, recipient_email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE LOWER(recipient_email) = LOWER($1) AND is_read = false",
        )
        .bind(recipient_email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &PgPool, recipient_email: &str) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE LOWER(recipient_email) = LOWER($1) AND is_read = false",
        )
        .bind(recipient_email)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
