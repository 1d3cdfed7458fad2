//! Glossary term rules.
//!
//! Glossary terms are single records that toggle directly between `draft`
//! and `published`. There is no version history and no review gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::faq::required_field;
use crate::types::DbId;

pub const GLOSSARY_STATUS_DRAFT: &str = "draft";
pub const GLOSSARY_STATUS_PUBLISHED: &str = "published";

pub const MAX_TERM_LEN: usize = 200;
pub const MAX_SHORT_DEFINITION_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlossaryStatus {
    Draft,
    Published,
}

impl GlossaryStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => GLOSSARY_STATUS_DRAFT,
            Self::Published => GLOSSARY_STATUS_PUBLISHED,
        }
    }
}

impl fmt::Display for GlossaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlossaryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GLOSSARY_STATUS_DRAFT => Ok(Self::Draft),
            GLOSSARY_STATUS_PUBLISHED => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "Invalid glossary status '{other}'. Must be one of: draft, published"
            ))),
        }
    }
}

/// Validate the required fields of a glossary term, returning them trimmed.
pub fn validate_term_fields(
    term: Option<&str>,
    short_definition: Option<&str>,
) -> Result<(String, String), CoreError> {
    let term = required_field("term", term, MAX_TERM_LEN)?;
    let short_definition = required_field("short_definition", short_definition, MAX_SHORT_DEFINITION_LEN)?;
    Ok((term, short_definition))
}

/// Trim alternate names, dropping blanks and duplicates while keeping order.
pub fn normalize_alternate_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for n in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !out.iter().any(|existing| existing == n) {
            out.push(n.to_string());
        }
    }
    out
}

/// A term may not list itself as related. Duplicates collapse to one edge.
pub fn normalize_related_ids(term_id: DbId, related: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    if related.contains(&term_id) {
        return Err(CoreError::Validation("A term cannot be related to itself".into()));
    }
    let mut out: Vec<DbId> = Vec::with_capacity(related.len());
    for id in related {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Terms index
// ---------------------------------------------------------------------------

/// Published-term source data for the tooltip index.
#[derive(Debug, Clone)]
pub struct IndexSource {
    pub term: String,
    pub slug: String,
    pub short_definition: String,
    pub abbreviation: Option<String>,
    pub alternate_names: Vec<String>,
}

/// One matchable surface form in the terms index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsIndexEntry {
    pub term: String,
    pub slug: String,
    pub short_definition: String,
}

/// Expand each term into its name, abbreviation and alternate names, sorted
/// longest-first so a greedy matcher prefers "Bird Barn Tour" over "Bird".
///
/// The sort is stable: equal-length forms keep source order.
pub fn build_terms_index(sources: &[IndexSource]) -> Vec<TermsIndexEntry> {
    let mut entries = Vec::new();
    for s in sources {
        let forms = std::iter::once(s.term.as_str())
            .chain(s.abbreviation.as_deref().filter(|a| !a.trim().is_empty()))
            .chain(s.alternate_names.iter().map(String::as_str));
        for form in forms {
            entries.push(TermsIndexEntry {
                term: form.to_string(),
                slug: s.slug.clone(),
                short_definition: s.short_definition.clone(),
            });
        }
    }
    entries.sort_by(|a, b| b.term.chars().count().cmp(&a.term.chars().count()));
    entries
}
