//! HTML sanitization for rich-text fields (FAQ answers, glossary long definitions).
//!
//! This is a strip-list sanitizer, not a parser: it removes script blocks,
//! embedding and form elements, inline event handlers and script-scheme URLs,
//! and leaves every other tag as authored.
//!
//! Limitation: entity-encoded or whitespace-split schemes
//! (`&#106;avascript:`, `java&#x09;script:`) are not decoded. Public pages
//! must still be served with a restrictive Content-Security-Policy.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));

static DANGEROUS_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:script|iframe|frame|frameset|object|embed|applet|form|input|button|select|textarea|base|meta|link)\b[^>]*>",
    )
    .expect("valid regex")
});

// `on*=` after whitespace, a slash (`<img/onerror=...>`) or a closing quote
// (`<a href="x"onclick=...>`). The quote is kept.
static EVENT_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:[\s/]+|(["']))on\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("valid regex")
});

// Quoted or unquoted URL attributes with a script scheme.
static SCRIPT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(href|src|action|formaction)\s*=\s*(?:"\s*(?:javascript|vbscript):[^"]*"|'\s*(?:javascript|vbscript):[^']*'|(?:javascript|vbscript):[^\s>]*)"#,
    )
    .expect("valid regex")
});

fn neutral_url(caps: &Captures) -> String {
    let attr = &caps[1];
    if attr.eq_ignore_ascii_case("href") {
        format!(r##"{attr}="#""##)
    } else {
        format!(r#"{attr}="""#)
    }
}

/// Strip executable content from author-supplied HTML.
pub fn sanitize_html(input: &str) -> String {
    let out = SCRIPT_BLOCK_RE.replace_all(input, "");
    let out = DANGEROUS_TAG_RE.replace_all(&out, "");
    let out = EVENT_HANDLER_RE.replace_all(&out, "$1");
    let out = SCRIPT_URL_RE.replace_all(&out, neutral_url);
    out.into_owned()
}

/// Sanitize an optional field, keeping `None` as `None`.
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_normal_html() {
        let input = "<p>Hello <strong>world</strong></p>";
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn strips_script_blocks() {
        let input = r#"<p>Hello</p><script>alert("xss")</script><p>World</p>"#;
        assert_eq!(sanitize_html(input), "<p>Hello</p><p>World</p>");
    }

    #[test]
    fn strips_multiline_script_with_attributes() {
        let input = "<p>a</p><SCRIPT type=\"text/javascript\">\nvar x = 1;\n</SCRIPT><p>b</p>";
        assert_eq!(sanitize_html(input), "<p>a</p><p>b</p>");
    }

    #[test]
    fn strips_iframes() {
        let input = r#"<p>Before</p><iframe src="evil.com"></iframe><p>After</p>"#;
        assert_eq!(sanitize_html(input), "<p>Before</p><p>After</p>");
    }

    #[test]
    fn strips_event_handlers() {
        let input = r#"<img src="photo.jpg" onerror="alert(1)">"#;
        assert_eq!(sanitize_html(input), r#"<img src="photo.jpg">"#);
    }

    #[test]
    fn neutralizes_javascript_urls() {
        let out = sanitize_html(r#"<a href="javascript:alert(1)">Click</a>"#);
        assert_eq!(out, r##"<a href="#">Click</a>"##);

        let out = sanitize_html(r#"<img src='javascript:alert(1)'>"#);
        assert_eq!(out, r#"<img src="">"#);
    }

    #[test]
    fn strips_handlers_without_whitespace_separator() {
        assert_eq!(sanitize_html("<img/onerror=alert(1)>"), "<img>");
        assert_eq!(sanitize_html("<svg/onload=alert(1)>"), "<svg>");
        assert_eq!(
            sanitize_html(r#"<a href="/x"onclick="steal()">x</a>"#),
            r#"<a href="/x">x</a>"#
        );
    }

    #[test]
    fn neutralizes_unquoted_and_other_script_urls() {
        assert_eq!(
            sanitize_html("<a href=javascript:alert(1)>Click</a>"),
            r##"<a href="#">Click</a>"##
        );
        assert_eq!(
            sanitize_html(r#"<a HREF=" VBScript:msgbox(1)">x</a>"#),
            r##"<a HREF="#">x</a>"##
        );
        assert_eq!(
            sanitize_html("<img src=javascript:alert(1) alt=x>"),
            r#"<img src="" alt=x>"#
        );
    }

    #[test]
    fn strips_meta_refresh_and_base() {
        let out = sanitize_html(
            r#"<meta http-equiv="refresh" content="0;url=https://evil.example"><base href="https://evil.example/"><p>ok</p>"#,
        );
        assert_eq!(out, "<p>ok</p>");
    }

    #[test]
    fn leaves_words_starting_with_on_alone() {
        let input = "<p>Rides run one at a time, online tickets only.</p>";
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn preserves_safe_links() {
        let input = r#"<a href="/faq/park-hours">Park Hours</a>"#;
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn strips_form_elements() {
        let out = sanitize_html(
            r#"<form action="/steal"><input type="text"><button>Submit</button></form>"#,
        );
        assert!(!out.contains("<form"));
        assert!(!out.contains("<input"));
        assert!(!out.contains("<button"));
        assert_eq!(out, "Submit");
    }
}
