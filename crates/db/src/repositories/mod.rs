//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Methods that must run inside a caller's
//! transaction take `&mut PgConnection` instead (pass `&mut *tx`).

pub mod audit_repo;
pub mod category_repo;
pub mod faq_entry_repo;
pub mod faq_version_repo;
pub mod glossary_category_repo;
pub mod glossary_term_repo;
pub mod notification_repo;
pub mod tag_repo;
pub mod term_relationship_repo;

pub use audit_repo::AuditLogRepo;
pub use category_repo::CategoryRepo;
pub use faq_entry_repo::FaqEntryRepo;
pub use faq_version_repo::FaqVersionRepo;
pub use glossary_category_repo::GlossaryCategoryRepo;
pub use glossary_term_repo::GlossaryTermRepo;
pub use notification_repo::NotificationRepo;
pub use tag_repo::TagRepo;
pub use term_relationship_repo::TermRelationshipRepo;

/// Build an `ILIKE` substring pattern, escaping the wildcard characters in
/// user input. Returns `None` for blank input.
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    let s = search.map(str::trim).filter(|s| !s.is_empty())?;
    let escaped = s
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}
