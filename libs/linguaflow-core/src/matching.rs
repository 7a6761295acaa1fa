//! Answer text normalization and comparison.

/// Normalize a learner or authored answer for comparison (trim + lowercase).
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive trimmed equality.
pub fn matches_exact(expected: &str, submitted: &str) -> bool {
    normalize(expected) == normalize(submitted)
}

/// Match against a `::`-delimited alternative list. Each alternative is
/// normalized; any one matching the submitted value counts.
pub fn matches_alternatives(expected: &str, submitted: &str) -> bool {
    let given = normalize(submitted);
    expected.split("::").any(|alt| normalize(alt) == given)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_is_case_insensitive_and_trimmed() {
        assert!(matches_exact("went", " Went "));
        assert!(!matches_exact("went", "gone"));
    }

    #[test]
    fn alternatives_or_match() {
        assert!(matches_alternatives("sky::heaven", "Sky"));
        assert!(matches_alternatives("sky::heaven", " HEAVEN"));
        assert!(!matches_alternatives("sky::heaven", "lake"));
    }

    #[test]
    fn single_alternative_behaves_like_exact() {
        assert!(matches_alternatives("sea", "Sea "));
        assert!(!matches_alternatives("sea", "ocean"));
    }

    #[test]
    fn empty_alternative_matches_empty_answer() {
        assert!(matches_alternatives("", ""));
        assert!(!matches_alternatives("sky", ""));
    }
}
