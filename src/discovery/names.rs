//! Candidate name validation and normalization.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error_handling::DiscoveryError;

/// Maximum length of a host name in presentation format, without the root dot.
const MAX_NAME_LENGTH: usize = 253;

/// Dot-separated labels of letters, digits, hyphens and underscores; labels
/// neither start nor end with a hyphen and are at most 63 characters long.
static HOST_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?(\.[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?)*$")
        .expect("host name pattern is valid")
});

fn is_host_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LENGTH && HOST_NAME.is_match(name)
}

/// Validates and normalizes the root domain: trimmed, lowercased, no trailing dot.
///
/// # Errors
///
/// Returns `DiscoveryError::InvalidDomain` if the result is not a host name.
pub fn validate_domain(domain: &str) -> Result<String, DiscoveryError> {
    let normalized = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if is_host_name(&normalized) {
        Ok(normalized)
    } else {
        Err(DiscoveryError::InvalidDomain(domain.to_string()))
    }
}

/// Turns raw discovered names into candidates for `root`.
///
/// `root` is always the first candidate. Every other name is trimmed, stripped
/// of a leading `*.` wildcard and trailing dot, and kept only if it is a valid
/// host name equal to or below `root`. Unless `keep_duplicates` is set, names
/// are deduplicated case-insensitively keeping the first spelling seen.
pub fn normalize_candidates(root: &str, names: Vec<String>, keep_duplicates: bool) -> Vec<String> {
    let root_key = root.to_ascii_lowercase();
    let suffix = format!(".{root_key}");

    let mut seen = HashSet::new();
    seen.insert(root_key.clone());
    let mut candidates = vec![root.to_string()];

    for raw in names {
        let name = raw.trim();
        let name = name.strip_prefix("*.").unwrap_or(name).trim_end_matches('.');
        if name.is_empty() || !is_host_name(name) {
            log::debug!("Dropping malformed discovered name {raw:?}");
            continue;
        }

        let key = name.to_ascii_lowercase();
        if key != root_key && !key.ends_with(&suffix) {
            log::debug!("Dropping {name}: not under {root}");
            continue;
        }
        if !seen.insert(key) && !keep_duplicates {
            continue;
        }
        candidates.push(name.to_string());
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_domain() {
        assert_eq!(validate_domain(" Example.COM. ").unwrap(), "example.com");
        assert_eq!(validate_domain("_dmarc.example.com").unwrap(), "_dmarc.example.com");
        assert!(validate_domain("").is_err());
        assert!(validate_domain("exa mple.com").is_err());
        assert!(validate_domain("-bad.example.com").is_err());
        assert!(validate_domain("example..com").is_err());
        assert!(validate_domain(&format!("{}.com", "a".repeat(64))).is_err());
    }

    #[test]
    fn test_wildcards_and_case_collapse() {
        let candidates = normalize_candidates(
            "example.test",
            owned(&["*.example.test", "WWW.example.test", "www.example.test.", "mail.example.test"]),
            false,
        );
        assert_eq!(
            candidates,
            owned(&["example.test", "WWW.example.test", "mail.example.test"])
        );
    }

    #[test]
    fn test_keep_duplicates() {
        let candidates = normalize_candidates(
            "example.test",
            owned(&["example.test", "www.example.test", "WWW.example.test"]),
            true,
        );
        assert_eq!(
            candidates,
            owned(&["example.test", "example.test", "www.example.test", "WWW.example.test"])
        );
    }

    #[test]
    fn test_foreign_and_malformed_names_dropped() {
        let candidates = normalize_candidates(
            "example.test",
            owned(&[
                "example.test.evil.test",
                "notexample.test",
                "bad name.example.test",
                "",
                "ok.example.test",
            ]),
            false,
        );
        assert_eq!(candidates, owned(&["example.test", "ok.example.test"]));
    }

    proptest! {
        #[test]
        fn test_root_first_and_unique(
            labels in prop::collection::vec("[a-z]{1,8}", 0..20)
        ) {
            let names: Vec<String> = labels.iter().map(|l| format!("{l}.example.test")).collect();
            let candidates = normalize_candidates("example.test", names, false);

            prop_assert_eq!(candidates[0].as_str(), "example.test");
            let unique: HashSet<String> = candidates.iter().map(|c| c.to_ascii_lowercase()).collect();
            prop_assert_eq!(unique.len(), candidates.len());
            for candidate in &candidates {
                prop_assert!(candidate == "example.test" || candidate.ends_with(".example.test"));
            }
        }

        #[test]
        fn test_keep_duplicates_preserves_every_valid_name(
            labels in prop::collection::vec("[a-z]{1,8}", 0..20)
        ) {
            let names: Vec<String> = labels.iter().map(|l| format!("{l}.example.test")).collect();
            let candidates = normalize_candidates("example.test", names.clone(), true);
            prop_assert_eq!(candidates.len(), names.len() + 1);
        }
    }
}
