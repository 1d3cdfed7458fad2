//! Audit log vocabulary.
//!
//! The audit log is append-only: one record per workflow transition, keyed to
//! an entry and usually a version. These helpers define what may be written;
//! there is deliberately no vocabulary for editing or removing a record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known action strings stored in `faq_audit_log.action`.
pub mod actions {
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
    pub const SUBMITTED: &str = "submitted";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const DELETED: &str = "deleted";
}

/// All valid audit actions.
pub const VALID_ACTIONS: &[&str] = &[
    actions::CREATED,
    actions::UPDATED,
    actions::SUBMITTED,
    actions::APPROVED,
    actions::REJECTED,
    actions::DELETED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Submitted,
    Approved,
    Rejected,
    Deleted,
}

impl AuditAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => actions::CREATED,
            Self::Updated => actions::UPDATED,
            Self::Submitted => actions::SUBMITTED,
            Self::Approved => actions::APPROVED,
            Self::Rejected => actions::REJECTED,
            Self::Deleted => actions::DELETED,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            actions::CREATED => Ok(Self::Created),
            actions::UPDATED => Ok(Self::Updated),
            actions::SUBMITTED => Ok(Self::Submitted),
            actions::APPROVED => Ok(Self::Approved),
            actions::REJECTED => Ok(Self::Rejected),
            actions::DELETED => Ok(Self::Deleted),
            other => Err(CoreError::Validation(format!(
                "Invalid audit action '{other}'. Must be one of: {}",
                VALID_ACTIONS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Details payloads
// ---------------------------------------------------------------------------

/// Details recorded with a `rejected` action.
pub fn rejection_details(note: &str) -> serde_json::Value {
    json!({ "note": note })
}

/// Details recorded with an `approved` action.
pub fn approval_details(version_number: i32, previous_live_version_id: Option<DbId>) -> serde_json::Value {
    json!({
        "version_number": version_number,
        "previous_live_version_id": previous_live_version_id,
    })
}

/// Details recorded with a `created` or `updated` action.
pub fn version_details(version_number: i32) -> serde_json::Value {
    json!({ "version_number": version_number })
}

/// Details recorded with a `deleted` action, captured before the entry disappears.
pub fn deletion_details(slug: &str, live_version_id: Option<DbId>) -> serde_json::Value {
    json!({
        "slug": slug,
        "live_version_id": live_version_id,
    })
}
