//! String utilities for the domain layer.
//!
//! Tokenization here is shared by the similarity, relevance and length
//! scorers so that every scorer agrees on what a "word" or a "term" is.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Split text into lowercased words.
///
/// A word is a maximal run of alphabetic characters, apostrophes and
/// hyphens. Digits and punctuation act as separators.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '-'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Number of words in `text` (see [`words`]).
pub fn word_count(text: &str) -> usize {
    words(text).len()
}

/// Number of Unicode scalar values in `text`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Lowercased non-whitespace characters, used as terms for logographic scripts.
pub fn char_terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_string())
        .collect()
}
