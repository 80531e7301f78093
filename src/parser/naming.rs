//! Flag name derivation.

use std::sync::LazyLock;

use regex::Regex;

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

/// Converts a Go identifier or JSON key to a kebab-case flag name.
///
/// Acronym runs stay together, so `HTTPPort` becomes `http-port` rather than
/// `h-t-t-p-port`.
pub fn to_kebab_case(name: &str) -> String {
    let split_acronyms = ACRONYM_BOUNDARY.replace_all(name, "${1}-${2}");
    let split_words = CAMEL_BOUNDARY.replace_all(&split_acronyms, "${1}-${2}");
    split_words.to_lowercase()
}

/// Go exports identifiers that start with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_conversions() {
        let cases = [
            ("ProbeAddr", "probe-addr"),
            ("EnableLeaderElection", "enable-leader-election"),
            ("V", "v"),
            ("HTTPPort", "http-port"),
            ("XMLParser", "xml-parser"),
            ("probeAddr", "probe-addr"),
            ("already-kebab", "already-kebab"),
            ("Port8080", "port8080"),
        ];

        for (input, expected) in cases {
            assert_eq!(to_kebab_case(input), expected, "input {input}");
        }
    }

    #[test]
    fn kebab_case_splits_plural_acronyms_like_the_regex_rule() {
        assert_eq!(
            to_kebab_case("requiredCRDsGracePeriod"),
            "required-cr-ds-grace-period"
        );
    }

    #[test]
    fn exported_identifiers() {
        assert!(is_exported("Host"));
        assert!(is_exported("Émile"));
        assert!(!is_exported("secret"));
        assert!(!is_exported("_Hidden"));
        assert!(!is_exported(""));
    }
}
