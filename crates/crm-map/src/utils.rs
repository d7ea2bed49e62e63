//! Utility functions for mapping operations.

/// Normalizes header text for comparison: lowercases, trims, and turns
/// underscore/hyphen separators into single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_become_spaces() {
        assert_eq!(normalize_text("First_Name"), "first name");
        assert_eq!(normalize_text(" E-mail "), "e mail");
        assert_eq!(normalize_text("phone   number"), "phone number");
        assert_eq!(normalize_text(""), "");
    }
}
