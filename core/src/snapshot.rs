//! The unit of construction, persistence and serving: trie plus token and text indexes.

use crate::index::{ResultKey, SearchResult};
use crate::ranking::{
    merge_primary_secondary, sort_by_score, RankingConfig, KEYWORD_SUBSTRING_WEIGHT, PREFIX_SUPPLEMENT_WEIGHT,
    TOKEN_CONTAINS_WEIGHT,
};
use crate::text_index::{TextIndex, TokenIndex};
use crate::tokenizer::{normalize, tokenize_unique};
use crate::trie::{Trie, TrieCounts};
use std::collections::HashSet;

/// Populated by a single build pass, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    trie: Trie,
    tokens: TokenIndex,
    texts: TextIndex,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(trie: Trie, tokens: TokenIndex, texts: TextIndex) -> Self {
        Self { trie, tokens, texts }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn tokens(&self) -> &TokenIndex {
        &self.tokens
    }

    pub fn texts(&self) -> &TextIndex {
        &self.texts
    }

    pub fn counts(&self) -> TrieCounts {
        self.trie.counts()
    }

    pub fn insert(&mut self, text: &str, result: SearchResult) {
        self.tokens.insert(text, &result);
        self.texts.insert(text, &result);
        self.trie.insert(text, result);
    }

    pub fn prefix_search(&self, prefix: &str, limit: usize, ranking: &RankingConfig) -> Vec<SearchResult> {
        self.trie.search_ranked(prefix, limit, ranking.prefix_ranking)
    }

    /// Keyword search. A multi-token query only returns entries matching every token.
    pub fn keyword_search(&self, query: &str, limit: usize, ranking: &RankingConfig) -> Vec<SearchResult> {
        let tokens = tokenize_unique(query);
        let Some((first, rest)) = tokens.split_first() else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let mut results = self.token_matches(first, ranking);
        for token in rest {
            if results.is_empty() {
                break;
            }
            let keys: HashSet<ResultKey> = self.token_matches(token, ranking).iter().map(SearchResult::key).collect();
            results.retain(|r| keys.contains(&r.key()));
        }
        sort_by_score(&mut results);
        results.truncate(limit);
        results
    }

    /// Exact token hits, then tokens containing it, then full-text substring hits,
    /// deduplicated so each entry keeps its highest tier.
    fn token_matches(&self, token: &str, ranking: &RankingConfig) -> Vec<SearchResult> {
        let mut seen: HashSet<ResultKey> = HashSet::new();
        let mut out = Vec::new();
        for r in self.tokens.exact(token) {
            if seen.insert(r.key()) {
                out.push(r.clone());
            }
        }
        for r in self.tokens.containing(token) {
            if seen.insert(r.key()) {
                out.push(r.scaled(TOKEN_CONTAINS_WEIGHT));
            }
        }
        for r in self.texts.substring_hits(token, ranking, KEYWORD_SUBSTRING_WEIGHT) {
            if seen.insert(r.key()) {
                out.push(r);
            }
        }
        out
    }

    /// Prefix search, topped up with substring hits when it comes back short or
    /// when `include_substring` asks for them.
    pub fn prefix_or_substring_search(
        &self,
        prefix: &str,
        limit: usize,
        include_substring: bool,
        ranking: &RankingConfig,
    ) -> Vec<SearchResult> {
        let mut results = self.prefix_search(prefix, limit, ranking);
        if limit == 0 {
            return results;
        }
        if include_substring || results.len() < limit {
            let mut seen: HashSet<ResultKey> = results.iter().map(SearchResult::key).collect();
            for hit in self.texts.substring_hits(&normalize(prefix), ranking, PREFIX_SUPPLEMENT_WEIGHT) {
                if seen.insert(hit.key()) {
                    results.push(hit);
                }
            }
        }
        sort_by_score(&mut results);
        results.truncate(limit);
        results
    }

    pub fn hybrid_search(&self, query: &str, limit: usize, prefer_prefix: bool, ranking: &RankingConfig) -> Vec<SearchResult> {
        let prefix = self.prefix_or_substring_search(query, limit, false, ranking);
        let keyword = self.keyword_search(query, limit, ranking);
        let (primary, secondary) = if prefer_prefix { (prefix, keyword) } else { (keyword, prefix) };
        merge_primary_secondary(primary, secondary, limit)
    }
}
