//! URL slug generation and validation for entries, terms, categories and tags.

use crate::error::CoreError;

/// Maximum slug length.
pub const MAX_SLUG_LEN: usize = 200;

/// Generate a URL-safe slug from free text.
///
/// Lowercases, replaces every run of non-alphanumeric characters with a single
/// hyphen, and trims leading/trailing hyphens.
pub fn generate_slug(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_hyphen = true;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }
    let trimmed = result.trim_end_matches('-');
    let mut slug = trimmed.to_string();
    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        slug = slug.trim_end_matches('-').to_string();
    }
    slug
}

/// Validate a slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Use the explicit slug when given (validated), otherwise derive one from `source`.
pub fn resolve_slug(explicit: Option<&str>, source: &str) -> Result<String, CoreError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => {
            validate_slug(s)?;
            Ok(s.to_string())
        }
        None => {
            let slug = generate_slug(source);
            validate_slug(&slug)?;
            Ok(slug)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_question() {
        assert_eq!(generate_slug("What are the park hours?"), "what-are-the-park-hours");
    }

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(generate_slug("  --Hello,   World!!-- "), "hello-world");
    }

    #[test]
    fn slug_of_symbols_is_empty() {
        assert_eq!(generate_slug("?!"), "");
        assert!(resolve_slug(None, "?!").is_err());
    }

    #[test]
    fn validate_rejects_uppercase_and_spaces() {
        assert!(validate_slug("park-hours-2025").is_ok());
        assert!(validate_slug("Park-Hours").is_err());
        assert!(validate_slug("park hours").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn explicit_slug_wins_over_derived() {
        assert_eq!(resolve_slug(Some("hours"), "What are the park hours?").unwrap(), "hours");
        assert_eq!(
            resolve_slug(Some("  "), "Parking").unwrap(),
            "parking"
        );
        assert!(resolve_slug(Some("Bad Slug"), "x").is_err());
    }

    #[test]
    fn long_text_is_truncated() {
        let slug = generate_slug(&"a ".repeat(300));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }
}
