//! Value-format checks for semantically tagged fields.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+()0-9.\-\s]+$").expect("phone pattern"));

const PHONE_MIN_DIGITS: usize = 7;

/// `local@domain.tld` shape; no attempt at full RFC 5322.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Digits and common separators only, with at least seven digits once
/// separators are stripped.
pub fn is_valid_phone(value: &str) -> bool {
    if !PHONE_CHARS_RE.is_match(value) {
        return false;
    }
    value.chars().filter(char::is_ascii_digit).count() >= PHONE_MIN_DIGITS
}
