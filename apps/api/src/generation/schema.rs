//! Validation primitives shared by every generated type.
//!
//! Deserialization checks field names and types; these helpers check what
//! serde cannot: cardinalities, non-empty strings and URL syntax.

use std::ops::RangeInclusive;

use reqwest::Url;
use thiserror::Error;

/// A single rule broken by generated output. `path` points at the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {rule}")]
pub struct SchemaViolation {
    pub path: String,
    pub rule: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule: rule.into(),
        }
    }
}

/// A generated type that can check its own shape after deserialization.
pub trait Schema {
    fn validate(&self) -> Result<(), SchemaViolation>;
}

pub fn non_empty(path: &str, value: &str) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        return Err(SchemaViolation::new(path, "must not be empty"));
    }
    Ok(())
}

pub fn len_in(
    path: &str,
    len: usize,
    allowed: RangeInclusive<usize>,
) -> Result<(), SchemaViolation> {
    if !allowed.contains(&len) {
        let rule = if allowed.start() == allowed.end() {
            format!("expected exactly {} items, got {len}", allowed.start())
        } else {
            format!(
                "expected {}-{} items, got {len}",
                allowed.start(),
                allowed.end()
            )
        };
        return Err(SchemaViolation::new(path, rule));
    }
    Ok(())
}

/// Returns true for absolute http(s) URLs with a host.
pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

pub fn http_url(path: &str, value: &str) -> Result<(), SchemaViolation> {
    if !is_http_url(value) {
        return Err(SchemaViolation::new(
            path,
            format!("'{value}' is not an absolute http(s) URL"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(non_empty("title", "   ").is_err());
        assert!(non_empty("title", "Cells").is_ok());
    }

    #[test]
    fn test_len_in_exact_message() {
        let err = len_in("quiz", 9, 10..=10).unwrap_err();
        assert_eq!(err.path, "quiz");
        assert_eq!(err.rule, "expected exactly 10 items, got 9");
    }

    #[test]
    fn test_len_in_range_message() {
        let err = len_in("flashcards", 7, 4..=6).unwrap_err();
        assert_eq!(err.rule, "expected 4-6 items, got 7");
        assert!(len_in("flashcards", 4, 4..=6).is_ok());
        assert!(len_in("flashcards", 6, 4..=6).is_ok());
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://developer.mozilla.org/en-US/docs/Web"));
        assert!(is_http_url("http://example.org/path?q=1"));
        assert!(!is_http_url(""));
        assert!(!is_http_url("example.com/article"));
        assert!(!is_http_url("ftp://files.example.com/a.pdf"));
        assert!(!is_http_url("javascript:alert(1)"));
    }

    #[test]
    fn test_violation_display() {
        let v = SchemaViolation::new("roadmap[0].steps", "must not be empty");
        assert_eq!(v.to_string(), "roadmap[0].steps: must not be empty");
    }
}
