//! Auxiliary indexes for keyword and substring queries the trie cannot answer.

use crate::index::{push_unique, SearchResult};
use crate::ranking::{char_offset, RankingConfig};
use crate::tokenizer::{normalize, tokenize_unique};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized token -> results whose text contains that token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenIndex {
    entries: BTreeMap<String, Vec<SearchResult>>,
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: &str, result: &SearchResult) {
        for token in tokenize_unique(text) {
            push_unique(self.entries.entry(token).or_default(), result.clone());
        }
    }

    pub fn exact(&self, token: &str) -> &[SearchResult] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Results of every indexed token that contains `token` but is not equal to it.
    pub fn containing<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a SearchResult> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.as_str() != token && key.contains(token))
            .flat_map(|(_, results)| results.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Full normalized text -> results inserted under it, scanned for substrings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextIndex {
    entries: BTreeMap<String, Vec<SearchResult>>,
}

impl TextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: &str, result: &SearchResult) {
        push_unique(self.entries.entry(normalize(text)).or_default(), result.clone());
    }

    /// Every result whose text contains `needle`, scored by
    /// `score * position_factor(offset) * weight`.
    pub fn substring_hits(&self, needle: &str, ranking: &RankingConfig, weight: f32) -> Vec<SearchResult> {
        if needle.is_empty() {
            return Vec::new();
        }
        let mut hits = Vec::new();
        for (text, results) in &self.entries {
            let Some(offset) = char_offset(text, needle) else {
                continue;
            };
            let factor = ranking.position_factor(offset, text.chars().count()) * weight;
            hits.extend(results.iter().map(|r| r.scaled(factor)));
        }
        hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
