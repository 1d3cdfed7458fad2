//! faircms API server library.
//!
//! Exposes configuration, state, error handling, extractors and the router
//! so the binary and the integration tests build the exact same app.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod side_effects;
pub mod state;
