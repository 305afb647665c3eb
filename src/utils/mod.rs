//! Common utilities and helper functions
//!
//! This module provides shared text helpers used across the application.

use regex::Regex;
use std::sync::OnceLock;

/// Normalize whitespace in text
///
/// Collapses runs of whitespace (including newlines) into single spaces and
/// trims the ends. Extracted page content is stored in this form.
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Count whitespace-separated words in text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncate text to a maximum length, appending an ellipsis
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("docker container deployment guide"), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a very long sentence", 10), "a very ...");
    }
}
