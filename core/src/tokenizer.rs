use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Lower-case normalization shared by the trie, token and text indexes.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Split text into maximal runs of word characters, lower-cased, dropping tokens
/// shorter than two characters. Order is preserved and duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    WORD.find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Like [`tokenize`] but keeps only the first occurrence of each token.
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text).into_iter().filter(|t| seen.insert(t.clone())).collect()
}
