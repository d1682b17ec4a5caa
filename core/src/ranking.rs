//! Scoring constants and the merge policies shared by every query strategy.

use crate::index::{ResultKey, SearchResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Multiplier for an indexed token that contains the query token.
pub const TOKEN_CONTAINS_WEIGHT: f32 = 0.8;
/// Multiplier for a keyword match found only by scanning full texts.
pub const KEYWORD_SUBSTRING_WEIGHT: f32 = 0.7;
/// Multiplier for substring hits that supplement a prefix search.
pub const PREFIX_SUPPLEMENT_WEIGHT: f32 = 0.8;
/// Multiplier for secondary-source results in a hybrid merge.
pub const HYBRID_SECONDARY_WEIGHT: f32 = 0.9;
/// Slope of the canonical position decay.
pub const DEFAULT_POSITION_DECAY: f32 = 0.3;

/// Tie-break used after score when ranking prefix results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixRanking {
    /// Frequency of the queried prefix node. It is identical for every result of one
    /// query, so ties keep traversal order.
    #[default]
    QueriedNode,
    /// Frequency of the node each result is stored at, most frequent first.
    ResultNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub prefix_ranking: PrefixRanking,
    pub position_decay: f32,
    pub prefer_prefix: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { prefix_ranking: PrefixRanking::default(), position_decay: DEFAULT_POSITION_DECAY, prefer_prefix: true }
    }
}

impl RankingConfig {
    /// `1 - (offset / len) * decay`, where offset and len are in characters.
    /// Earlier matches score higher; a match at offset 0 keeps full weight.
    pub fn position_factor(&self, offset: usize, len: usize) -> f32 {
        if len == 0 {
            return 1.0;
        }
        1.0 - (offset as f32 / len as f32) * self.position_decay
    }
}

/// Character offset of the first occurrence of `needle` in `haystack`.
pub fn char_offset(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle).map(|byte| haystack[..byte].chars().count())
}

pub fn cmp_score_desc(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Stable sort by score, highest first.
pub fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| cmp_score_desc(a.score, b.score));
}

/// Primary results first with their own scores, then secondary results not already
/// emitted with the secondary weight applied, up to `limit` entries.
pub fn merge_primary_secondary(primary: Vec<SearchResult>, secondary: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    let mut seen: HashSet<ResultKey> = HashSet::new();
    let mut out = Vec::with_capacity(limit);
    for r in primary {
        if out.len() >= limit {
            break;
        }
        if seen.insert(r.key()) {
            out.push(r);
        }
    }
    for r in secondary {
        if out.len() >= limit {
            break;
        }
        if seen.insert(r.key()) {
            out.push(r.scaled(HYBRID_SECONDARY_WEIGHT));
        }
    }
    out
}
