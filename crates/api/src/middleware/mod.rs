//! Request extractors for identity and authorization.
//!
//! - [`auth::AuthUser`] -- resolves the acting editor from a bearer token
//!   (or mock headers in development).
//! - [`rbac::RequireAuthor`], [`rbac::RequireReviewer`], [`rbac::RequireAdmin`]
//!   -- enforce a minimum role.

pub mod auth;
pub mod rbac;
