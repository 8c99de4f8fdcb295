//! Breaking-change detection

use regex::Regex;
use std::sync::LazyLock;

/// Marker a body or footer must start with to signal a breaking change.
/// Case-sensitive, anchored, and requires whitespace after the colon.
static BREAKING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BREAKING\s+CHANGES?:\s+").expect("Invalid regex"));

/// Check whether a commit's body or footer carries the breaking-change marker
pub fn is_breaking_change(body: Option<&str>, footer: Option<&str>) -> bool {
    body.is_some_and(|text| BREAKING_REGEX.is_match(text))
        || footer.is_some_and(|text| BREAKING_REGEX.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_in_body() {
        assert!(is_breaking_change(Some("BREAKING CHANGE: removed X"), None));
    }

    #[test]
    fn test_breaking_in_footer() {
        assert!(is_breaking_change(None, Some("BREAKING CHANGE: removed X")));
    }

    #[test]
    fn test_plural_marker() {
        assert!(is_breaking_change(
            Some("BREAKING CHANGES: removed X and Y"),
            None
        ));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!is_breaking_change(Some("breaking change: x"), None));
        assert!(!is_breaking_change(Some("Breaking Change: x"), None));
    }

    #[test]
    fn test_anchored_at_start() {
        assert!(!is_breaking_change(
            Some("This introduces a BREAKING CHANGE: x"),
            None
        ));
    }

    #[test]
    fn test_requires_space_after_colon() {
        assert!(!is_breaking_change(Some("BREAKING CHANGE:x"), None));
    }

    #[test]
    fn test_absent_text() {
        assert!(!is_breaking_change(None, None));
        assert!(!is_breaking_change(Some(""), Some("")));
    }
}
