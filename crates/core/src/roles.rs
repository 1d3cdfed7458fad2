//! Editorial roles and their ordering.
//!
//! Roles are totally ordered: `author < reviewer < admin`. A check for a
//! minimum role passes for that role and everything above it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_AUTHOR: &str = "author";

/// Identity-provider group that grants the admin role.
pub const GROUP_ADMINS: &str = "CMS-Admins";
/// Identity-provider group that grants the reviewer role.
pub const GROUP_REVIEWERS: &str = "CMS-Reviewers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Author,
    Reviewer,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => ROLE_AUTHOR,
            Self::Reviewer => ROLE_REVIEWER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    pub fn has_min_role(self, required: Role) -> bool {
        self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_REVIEWER => Ok(Self::Reviewer),
            ROLE_AUTHOR => Ok(Self::Author),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// Map identity-provider group membership to a role.
///
/// Admin wins over reviewer; anyone else is an author.
pub fn resolve_role<S: AsRef<str>>(groups: &[S]) -> Role {
    if groups.iter().any(|g| g.as_ref() == GROUP_ADMINS) {
        Role::Admin
    } else if groups.iter().any(|g| g.as_ref() == GROUP_REVIEWERS) {
        Role::Reviewer
    } else {
        Role::Author
    }
}

/// Fail with [`CoreError::Forbidden`] unless `actual` meets `required`.
pub fn require_role(actual: Role, required: Role) -> Result<(), CoreError> {
    if actual.has_min_role(required) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{required}' or higher required (have '{actual}')"
        )))
    }
}
