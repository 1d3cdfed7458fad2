//! Editorial notifications: an inbox row per message, plus email when SMTP
//! is configured.

use std::sync::Arc;

use async_trait::async_trait;
use faircms_core::notification::NotificationMessage;
use faircms_db::models::notification::{CreateNotification, Notification};
use faircms_db::repositories::NotificationRepo;
use faircms_db::DbPool;

use crate::delivery::email::EmailDelivery;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to store notification: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotifyError>;
}

/// Writes to the `notifications` table, then mails the recipient.
///
/// A mail failure is logged and does not fail the send; the inbox row is
/// the record of truth.
pub struct DbNotificationSender {
    pool: DbPool,
    email: Option<Arc<EmailDelivery>>,
}

impl DbNotificationSender {
    pub fn new(pool: DbPool, email: Option<Arc<EmailDelivery>>) -> Self {
        Self { pool, email }
    }

    async fn store(&self, message: &NotificationMessage) -> Result<Notification, NotifyError> {
        Ok(NotificationRepo::create(&self.pool, &CreateNotification::from(message)).await?)
    }
}

#[async_trait]
impl NotificationSender for DbNotificationSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
        let stored = self.store(message).await?;
        tracing::info!(
            notification_id = stored.id,
            recipient = %stored.recipient_email,
            notification_type = %message.notification_type,
            "Notification stored"
        );

        if let Some(mailer) = &self.email {
            if let Err(e) = mailer.deliver(message).await {
                tracing::warn!(
                    notification_id = stored.id,
                    error = %e,
                    "Notification email failed"
                );
            }
        }
        Ok(())
    }
}
