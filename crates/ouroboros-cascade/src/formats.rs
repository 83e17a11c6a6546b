//! String format checks backing the `Email` and `Pattern` constraints

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ConfigResult, ConfigurationError};

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

const LOCAL_PART_ATOM: &str = r"[a-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]";

const LOCAL_PART_QUOTED_ATOM: &str =
    r#"(?:[a-z0-9!#$%&'*.(),<>\[\]:; @+/=?^_`{|}~\x{80}-\x{10FFFF}-]|\\\\|\\")"#;

const DOMAIN_LABEL: &str = r"[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?";

const IPV4_LITERAL: &str = r"\[[0-9]{1,3}(?:\.[0-9]{1,3}){3}\]";

const IPV6_LITERAL: &str = r"\[IPv6:[0-9a-f:.]+\]";

/// Dot-separated atoms or quoted strings
static LOCAL_PART_REGEX: Lazy<Regex> = Lazy::new(|| {
    let word = [
        "(?:", LOCAL_PART_ATOM, "+|\"", LOCAL_PART_QUOTED_ATOM, "+\")",
    ]
    .concat();
    Regex::new(&["(?i)^", &word, r"(?:\.", &word, ")*$"].concat()).unwrap()
});

/// Host name, or an address literal in brackets
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        &[
            "(?i)^(?:",
            DOMAIN_LABEL,
            r"(?:\.",
            DOMAIN_LABEL,
            ")*|",
            IPV4_LITERAL,
            "|",
            IPV6_LITERAL,
            ")$",
        ]
        .concat(),
    )
    .unwrap()
});

const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_DOMAIN_LENGTH: usize = 255;
const MAX_DOMAIN_LABEL_LENGTH: usize = 63;

// ============================================================================
// Format Validators
// ============================================================================

/// Check an email address
///
/// The domain may be a single label (`admin@localhost`). The empty string
/// is accepted; use `NotEmpty` or `NotBlank` to reject it.
pub fn is_valid_email(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.chars().count() > MAX_LOCAL_PART_LENGTH || domain.len() > MAX_DOMAIN_LENGTH {
        return false;
    }
    if domain
        .split('.')
        .any(|label| label.chars().count() > MAX_DOMAIN_LABEL_LENGTH)
    {
        return false;
    }
    LOCAL_PART_REGEX.is_match(local) && DOMAIN_REGEX.is_match(domain)
}

/// Compile `pattern` so that it must match the whole input
pub fn compile_full_match(pattern: &str) -> ConfigResult<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
