//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Read projections that join several tables live next to the entity they
//! are centred on.

pub mod audit;
pub mod category;
pub mod faq_entry;
pub mod faq_version;
pub mod glossary;
pub mod notification;
pub mod tag;
