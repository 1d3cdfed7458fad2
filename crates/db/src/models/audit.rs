//! FAQ audit log model.
//!
//! Audit records are immutable: there is a create DTO and nothing else.

use faircms_core::audit::AuditAction;
use faircms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `faq_audit_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLogEntry {
    pub id: DbId,
    pub entry_id: Option<DbId>,
    pub version_id: Option<DbId>,
    pub action: String,
    pub actor_email: String,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for appending an audit record.
#[derive(Debug, Clone)]
pub struct CreateAuditLogEntry {
    pub entry_id: Option<DbId>,
    pub version_id: Option<DbId>,
    pub action: AuditAction,
    pub actor_email: String,
    pub details: Option<serde_json::Value>,
}
