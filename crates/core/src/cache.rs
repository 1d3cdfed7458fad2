//! Cache scopes and key layout for public responses.
//!
//! The cache is derived state. Keys are grouped under a scope prefix so a
//! single invalidation call drops every public response of that content type.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
    Faq,
    Glossary,
}

impl CacheScope {
    pub const ALL: [CacheScope; 2] = [CacheScope::Faq, CacheScope::Glossary];

    /// The scope whose prefix covers `key`, if any.
    pub fn of_key(key: &str) -> Option<CacheScope> {
        Self::ALL.into_iter().find(|scope| scope.covers(key))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Glossary => "glossary",
        }
    }

    /// Key prefix covering every cached response in this scope.
    pub fn prefix(self) -> String {
        format!("{}:", self.as_str())
    }

    pub fn covers(self, key: &str) -> bool {
        key.starts_with(&self.prefix())
    }
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Key builders
// ---------------------------------------------------------------------------

pub fn faq_list_key(page: i64, limit: i64, category: Option<&str>, tag: Option<&str>) -> String {
    format!(
        "faq:list:{page}:{limit}:{}:{}",
        category.unwrap_or("all"),
        tag.unwrap_or("all")
    )
}

pub fn faq_detail_key(slug: &str) -> String {
    format!("faq:detail:{slug}")
}

pub fn faq_categories_key() -> String {
    "faq:categories".into()
}

pub fn glossary_list_key() -> String {
    "glossary:list".into()
}

pub fn glossary_detail_key(slug: &str) -> String {
    format!("glossary:detail:{slug}")
}

pub fn glossary_terms_index_key() -> String {
    "glossary:terms-index".into()
}
