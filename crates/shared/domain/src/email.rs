//! Email format check.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::EMAIL_PATTERN;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());

/// Returns `true` when the whole string is a syntactically valid email address.
///
/// Multi-level top-level segments such as `.co.uk` are accepted; anything
/// around the address (whitespace, trailing text) is not.
pub fn is_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
