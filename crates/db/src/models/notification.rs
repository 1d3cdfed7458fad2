//! Notification inbox model and DTO.

use faircms_core::notification::{NotificationMessage, NotificationType};
use faircms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_email: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub body: Option<String>,
    pub link_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient_email: String,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: Option<String>,
    pub link_url: Option<String>,
}

impl From<&NotificationMessage> for CreateNotification {
    fn from(m: &NotificationMessage) -> Self {
        Self {
            recipient_email: m.recipient_email.clone(),
            notification_type: m.notification_type,
            title: m.title.clone(),
            body: Some(m.body.clone()),
            link_url: Some(m.link_url.clone()),
        }
    }
}
