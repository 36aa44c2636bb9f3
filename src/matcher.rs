//! Substring matching for suite and test filters.

/// Returns true when `filter` is absent or occurs anywhere in `name`.
///
/// The comparison is case-sensitive and unanchored, so the empty filter
/// matches every name and a filter longer than `name` matches none.
pub fn matches(name: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(pattern) => name.contains(pattern),
    }
}

#[cfg(test)]
mod tests {
    use super::matches;

    #[test]
    fn absent_filter_matches_everything() {
        assert!(matches("anything", None));
        assert!(matches("", None));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches("anything", Some("")));
        assert!(matches("", Some("")));
    }

    #[test]
    fn substring_anywhere() {
        assert!(matches("test_foo_bar", Some("foo")));
        assert!(matches("test_foo_bar", Some("test_")));
        assert!(matches("test_foo_bar", Some("_bar")));
        assert!(!matches("abc", Some("xyz")));
    }

    #[test]
    fn case_sensitive_and_length_bounded() {
        assert!(!matches("Suite", Some("suite")));
        assert!(!matches("ab", Some("abc")));
    }
}
