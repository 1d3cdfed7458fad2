//! Identity primitives.
//!
//! - [`jwt`] -- identity-token generation, validation and role resolution.

pub mod jwt;
