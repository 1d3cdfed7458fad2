use crate::types::DbId;
use crate::workflow::{Transition, VersionStatus};

/// Domain error taxonomy shared by the repository and HTTP layers.
///
/// Every variant is an expected, recoverable outcome. Storage failures are
/// not represented here; they travel as `sqlx::Error` and abort the
/// surrounding transaction.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} with slug '{slug}'")]
    SlugNotFound { entity: &'static str, slug: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot {verb} a version in status '{from}'", verb = .transition.verb())]
    InvalidTransition {
        from: VersionStatus,
        transition: Transition,
    },

    #[error("Cannot approve your own submission")]
    SelfApproval,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The actor's role is below the minimum required for the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
