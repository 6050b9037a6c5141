//! Phone Number Checks
//!
//! International numbers in `+<country code><national number>` form. Spaces,
//! dashes, dots and parentheses are tolerated as separators. Whether a number
//! is actually assigned is decided by the libphonenumber metadata.

use std::sync::LazyLock;

use regex::Regex;

static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("valid hardcoded regex"));

/// Strip formatting separators, keeping the leading `+` and digits
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

/// Whether the input is a valid international phone number
///
/// The number must carry its calling code, and the national part must match a
/// numbering plan that country actually uses.
pub fn is_valid_phone_number(input: &str) -> bool {
    let number = normalize(input);
    if !E164_RE.is_match(&number) {
        return false;
    }

    phonenumber::parse(None, &number).is_ok_and(|parsed| phonenumber::is_valid(&parsed))
}
