//! FAQ version state machine.
//!
//! A version moves `draft -> pending_review -> published`. A rejection sends
//! a pending version back to `draft` with a note attached; "rejected" is an
//! annotation on a draft, never a stored status of its own.
//!
//! This module only decides whether a transition is legal. Applying it
//! atomically (conditional update, live pointer, audit record) is the job of
//! the repository layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PENDING_REVIEW: &str = "pending_review";
pub const STATUS_PUBLISHED: &str = "published";

/// Stored workflow status of a single FAQ version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    PendingReview,
    Published,
}

impl VersionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::PendingReview => STATUS_PENDING_REVIEW,
            Self::Published => STATUS_PUBLISHED,
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PENDING_REVIEW => Ok(Self::PendingReview),
            STATUS_PUBLISHED => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "Invalid version status '{other}'. Must be one of: {STATUS_DRAFT}, \
                 {STATUS_PENDING_REVIEW}, {STATUS_PUBLISHED}"
            ))),
        }
    }
}

/// Status filter accepted by the editorial listing.
///
/// `Rejected` selects drafts that carry a rejection note, which is how a
/// rejected submission is represented in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Draft,
    PendingReview,
    Published,
    Rejected,
}

impl StatusFilter {
    /// The stored status the filter matches on.
    pub const fn stored_status(self) -> VersionStatus {
        match self {
            Self::Draft | Self::Rejected => VersionStatus::Draft,
            Self::PendingReview => VersionStatus::PendingReview,
            Self::Published => VersionStatus::Published,
        }
    }

    pub const fn requires_rejection_note(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// A workflow step that changes a version's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Submit,
    Approve,
    Reject,
}

impl Transition {
    /// Status the version must currently hold.
    pub const fn required_status(self) -> VersionStatus {
        match self {
            Self::Submit => VersionStatus::Draft,
            Self::Approve | Self::Reject => VersionStatus::PendingReview,
        }
    }

    /// Status the version holds after the transition.
    pub const fn target_status(self) -> VersionStatus {
        match self {
            Self::Submit => VersionStatus::PendingReview,
            Self::Approve => VersionStatus::Published,
            Self::Reject => VersionStatus::Draft,
        }
    }

    pub const fn audit_action(self) -> AuditAction {
        match self {
            Self::Submit => AuditAction::Submitted,
            Self::Approve => AuditAction::Approved,
            Self::Reject => AuditAction::Rejected,
        }
    }

    /// Human-readable verb used in error messages.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Submit => "submit for review",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Check that `transition` may be applied to a version in `current`.
///
/// Returns the resulting status on success.
pub fn check_transition(
    current: VersionStatus,
    transition: Transition,
) -> Result<VersionStatus, CoreError> {
    if current == transition.required_status() {
        Ok(transition.target_status())
    } else {
        Err(CoreError::InvalidTransition {
            from: current,
            transition,
        })
    }
}

/// Normalize an email for identity comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Enforce separation of duties: the author of a version may never approve it,
/// whatever their role.
pub fn check_separation_of_duties(author_email: &str, reviewer_email: &str) -> Result<(), CoreError> {
    if normalize_email(author_email) == normalize_email(reviewer_email) {
        return Err(CoreError::SelfApproval);
    }
    Ok(())
}

/// A rejection must explain itself. Returns the trimmed note.
pub fn validate_rejection_note(note: Option<&str>) -> Result<&str, CoreError> {
    match note.map(str::trim) {
        Some(n) if !n.is_empty() => {
            if n.chars().count() > MAX_REJECTION_NOTE_LEN {
                return Err(CoreError::Validation(format!(
                    "Rejection note must be at most {MAX_REJECTION_NOTE_LEN} characters"
                )));
            }
            Ok(n)
        }
        _ => Err(CoreError::Validation("Rejection note is required".into())),
    }
}

/// Upper bound on rejection note length.
pub const MAX_REJECTION_NOTE_LEN: usize = 2000;

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for s in [
            VersionStatus::Draft,
            VersionStatus::PendingReview,
            VersionStatus::Published,
        ] {
            assert_eq!(s.as_str().parse::<VersionStatus>().unwrap(), s);
        }
    }

    #[test]
    fn rejected_is_not_a_stored_status() {
        assert_matches!("rejected".parse::<VersionStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn submit_requires_draft() {
        assert_eq!(
            check_transition(VersionStatus::Draft, Transition::Submit).unwrap(),
            VersionStatus::PendingReview
        );
        assert_matches!(
            check_transition(VersionStatus::PendingReview, Transition::Submit),
            Err(CoreError::InvalidTransition {
                from: VersionStatus::PendingReview,
                transition: Transition::Submit,
            })
        );
        assert_matches!(
            check_transition(VersionStatus::Published, Transition::Submit),
            Err(CoreError::InvalidTransition { .. })
        );
    }

    #[test]
    fn approve_and_reject_require_pending_review() {
        for t in [Transition::Approve, Transition::Reject] {
            assert!(check_transition(VersionStatus::PendingReview, t).is_ok());
            assert_matches!(
                check_transition(VersionStatus::Draft, t),
                Err(CoreError::InvalidTransition { .. })
            );
            assert_matches!(
                check_transition(VersionStatus::Published, t),
                Err(CoreError::InvalidTransition { .. })
            );
        }
    }

    #[test]
    fn reject_returns_to_draft() {
        assert_eq!(Transition::Reject.target_status(), VersionStatus::Draft);
    }

    #[test]
    fn transitions_map_to_audit_actions() {
        assert_eq!(Transition::Submit.audit_action(), AuditAction::Submitted);
        assert_eq!(Transition::Approve.audit_action(), AuditAction::Approved);
        assert_eq!(Transition::Reject.audit_action(), AuditAction::Rejected);
    }

    #[test]
    fn self_approval_is_refused_case_insensitively() {
        assert_matches!(
            check_separation_of_duties("author@fair.example.com", " Author@Fair.Example.com "),
            Err(CoreError::SelfApproval)
        );
        assert!(check_separation_of_duties("author@fair.example.com", "reviewer@fair.example.com").is_ok());
    }

    #[test]
    fn rejection_note_is_required_and_trimmed() {
        assert_matches!(validate_rejection_note(None), Err(CoreError::Validation(_)));
        assert_matches!(validate_rejection_note(Some("   ")), Err(CoreError::Validation(_)));
        assert_eq!(
            validate_rejection_note(Some("  Needs more detail ")).unwrap(),
            "Needs more detail"
        );
    }

    #[test]
    fn overlong_rejection_note_is_refused() {
        let note = "x".repeat(MAX_REJECTION_NOTE_LEN + 1);
        assert_matches!(validate_rejection_note(Some(&note)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejected_filter_matches_annotated_drafts() {
        assert_eq!(StatusFilter::Rejected.stored_status(), VersionStatus::Draft);
        assert!(StatusFilter::Rejected.requires_rejection_note());
        assert!(!StatusFilter::Draft.requires_rejection_note());
    }
}
