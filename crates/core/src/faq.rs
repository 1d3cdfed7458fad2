//! FAQ content validation.

use crate::error::CoreError;

pub const MAX_QUESTION_LEN: usize = 500;
pub const MAX_ANSWER_LEN: usize = 50_000;
pub const MAX_KEYWORDS_LEN: usize = 1_000;

/// Validated content for a new FAQ version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionContent {
    pub question: String,
    pub answer: String,
    pub search_keywords: Option<String>,
}

/// Trim and validate version content. Question and answer are required.
///
/// The answer is returned as given (after trimming); HTML sanitization is a
/// separate step applied by the caller before storage.
pub fn validate_version_content(
    question: Option<&str>,
    answer: Option<&str>,
    search_keywords: Option<&str>,
) -> Result<VersionContent, CoreError> {
    let question = required_field("question", question, MAX_QUESTION_LEN)?;
    let answer = required_field("answer", answer, MAX_ANSWER_LEN)?;
    let search_keywords = match search_keywords.map(str::trim).filter(|k| !k.is_empty()) {
        Some(k) if k.chars().count() > MAX_KEYWORDS_LEN => {
            return Err(CoreError::Validation(format!(
                "searchKeywords must be at most {MAX_KEYWORDS_LEN} characters"
            )));
        }
        other => other.map(str::to_string),
    };
    Ok(VersionContent {
        question,
        answer,
        search_keywords,
    })
}

/// Trim a required text field, rejecting missing, blank and overlong values.
pub fn required_field(name: &str, value: Option<&str>, max_len: usize) -> Result<String, CoreError> {
    let v = value.map(str::trim).unwrap_or_default();
    if v.is_empty() {
        return Err(CoreError::Validation(format!("{name} is required")));
    }
    if v.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {max_len} characters"
        )));
    }
    Ok(v.to_string())
}

/// Public deep link into the editorial UI for an entry.
pub fn admin_link(entry_id: i64) -> String {
    format!("/admin/faq/{entry_id}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn question_and_answer_required() {
        assert_matches!(
            validate_version_content(None, Some("a"), None),
            Err(CoreError::Validation(msg)) if msg == "question is required"
        );
        assert_matches!(
            validate_version_content(Some("q"), Some("   "), None),
            Err(CoreError::Validation(msg)) if msg == "answer is required"
        );
    }

    #[test]
    fn content_is_trimmed_and_blank_keywords_dropped() {
        let c = validate_version_content(
            Some("  What are the park hours? "),
            Some(" 9 to 5 "),
            Some("  "),
        )
        .unwrap();
        assert_eq!(c.question, "What are the park hours?");
        assert_eq!(c.answer, "9 to 5");
        assert_eq!(c.search_keywords, None);
    }

    #[test]
    fn overlong_question_rejected() {
        let q = "q".repeat(MAX_QUESTION_LEN + 1);
        assert_matches!(
            validate_version_content(Some(&q), Some("a"), None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn admin_link_format() {
        assert_eq!(admin_link(42), "/admin/faq/42");
    }
}
