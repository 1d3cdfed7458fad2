//! Glossary term models, DTOs and read projections.

use faircms_core::glossary::{GlossaryStatus, IndexSource};
use faircms_core::pagination::PageRequest;
use faircms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::GlossaryCategory;

/// A row from the `glossary_terms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GlossaryTerm {
    pub id: DbId,
    pub term: String,
    pub slug: String,
    pub short_definition: String,
    pub long_definition: Option<String>,
    pub abbreviation: Option<String>,
    pub acronym_expansion: Option<String>,
    pub alternate_names: Vec<String>,
    pub category_id: Option<DbId>,
    pub example_usage: Option<String>,
    pub status: String,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a glossary term. New terms start as drafts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGlossaryTerm {
    #[serde(default)]
    pub term: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub short_definition: String,
    pub long_definition: Option<String>,
    pub abbreviation: Option<String>,
    pub acronym_expansion: Option<String>,
    pub alternate_names: Option<Vec<String>>,
    pub category_id: Option<DbId>,
    pub example_usage: Option<String>,
    pub related_term_ids: Option<Vec<DbId>>,
}

/// DTO for updating a glossary term. All fields optional.
///
/// `status` flips the term directly between draft and published.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGlossaryTerm {
    pub term: Option<String>,
    pub slug: Option<String>,
    pub short_definition: Option<String>,
    pub long_definition: Option<String>,
    pub abbreviation: Option<String>,
    pub acronym_expansion: Option<String>,
    pub alternate_names: Option<Vec<String>>,
    pub category_id: Option<DbId>,
    pub example_usage: Option<String>,
    pub status: Option<GlossaryStatus>,
    pub related_term_ids: Option<Vec<DbId>>,
}

/// Filters for the editorial glossary listing.
#[derive(Debug, Clone, Default)]
pub struct GlossaryFilter {
    pub status: Option<GlossaryStatus>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
    pub page: PageRequest,
}

/// Compact view of a related term.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RelatedTerm {
    pub id: DbId,
    pub term: String,
    pub slug: String,
    pub short_definition: String,
}

/// Term detail with its category and outgoing related terms.
#[derive(Debug, Clone, Serialize)]
pub struct GlossaryTermDetail {
    #[serde(flatten)]
    pub term: GlossaryTerm,
    pub category: Option<GlossaryCategory>,
    pub related_terms: Vec<RelatedTerm>,
}

/// Source row for the tooltip terms index.
#[derive(Debug, Clone, FromRow)]
pub struct TermsIndexRow {
    pub term: String,
    pub slug: String,
    pub short_definition: String,
    pub abbreviation: Option<String>,
    pub alternate_names: Vec<String>,
}

impl From<TermsIndexRow> for IndexSource {
    fn from(row: TermsIndexRow) -> Self {
        IndexSource {
            term: row.term,
            slug: row.slug,
            short_definition: row.short_definition,
            abbreviation: row.abbreviation,
            alternate_names: row.alternate_names,
        }
    }
}
