//! Domain logic shared by every faircms crate.
//!
//! Nothing in here touches the database or the network. The repository layer,
//! the HTTP layer and the collaborator adapters all build on these types.

pub mod audit;
pub mod cache;
pub mod error;
pub mod faq;
pub mod glossary;
pub mod notification;
pub mod pagination;
pub mod roles;
pub mod sanitize;
pub mod slug;
pub mod types;
pub mod workflow;
