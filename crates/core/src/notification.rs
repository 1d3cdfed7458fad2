//! Editorial notification vocabulary and message text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::faq::admin_link;
use crate::types::DbId;

/// Default address for review-queue notifications.
pub const DEFAULT_REVIEWERS_EMAIL: &str = "reviewers@fair.example.com";

/// Maximum notifications returned by an inbox listing.
pub const INBOX_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ReviewRequested,
    Approved,
    Rejected,
}

impl NotificationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReviewRequested => "review_requested",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "review_requested" => Ok(Self::ReviewRequested),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid notification type '{other}'"
            ))),
        }
    }
}

/// A notification ready to be persisted and mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub recipient_email: String,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub link_url: String,
}

/// Sent to the reviewers' address when an author submits a version.
pub fn review_requested(reviewers_email: &str, author_email: &str, entry_id: DbId) -> NotificationMessage {
    NotificationMessage {
        recipient_email: reviewers_email.to_string(),
        notification_type: NotificationType::ReviewRequested,
        title: "New FAQ submitted for review".into(),
        body: format!("{author_email} submitted an FAQ for review."),
        link_url: admin_link(entry_id),
    }
}

/// Sent to the version's author when it is approved.
pub fn approved(author_email: &str, reviewer_email: &str, entry_id: DbId) -> NotificationMessage {
    NotificationMessage {
        recipient_email: author_email.to_string(),
        notification_type: NotificationType::Approved,
        title: "Your FAQ has been approved".into(),
        body: format!("Your FAQ was approved by {reviewer_email} and is now published."),
        link_url: admin_link(entry_id),
    }
}

/// Sent to the version's author when it is rejected.
pub fn rejected(author_email: &str, reviewer_email: &str, note: &str, entry_id: DbId) -> NotificationMessage {
    NotificationMessage {
        recipient_email: author_email.to_string(),
        notification_type: NotificationType::Rejected,
        title: "Your FAQ was not approved".into(),
        body: format!("Your FAQ was rejected by {reviewer_email}. Note: {note}"),
        link_url: admin_link(entry_id),
    }
}
