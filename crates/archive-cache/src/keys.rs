//! Cache key builders for all archive cache entries.

/// Prefix applied to all archive cache keys.
const PREFIX: &str = "archive";

/// Pattern matching every reference data entry.
pub fn reference_pattern() -> String {
    format!("{PREFIX}:*")
}

/// Cache key for the site user list.
pub fn users() -> String {
    format!("{PREFIX}:users:all")
}

/// Cache key for the document type list.
pub fn document_types() -> String {
    format!("{PREFIX}:document_types:all")
}

/// Cache key for the storage location list.
pub fn locations() -> String {
    format!("{PREFIX}:locations:all")
}

/// Cache key for the sensitivity term set.
pub fn sensitivity_terms(term_set: &str) -> String {
    format!("{PREFIX}:sensitivity:{}", term_set.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_share_prefix() {
        let pattern = reference_pattern();
        let prefix = pattern.trim_end_matches('*');
        for key in [users(), document_types(), locations(), sensitivity_terms("S")] {
            assert!(key.starts_with(prefix), "{key}");
        }
        assert_eq!(sensitivity_terms("Sensitivität"), "archive:sensitivity:sensitivität");
    }
}
