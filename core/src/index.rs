use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque key/value data carried with a result so callers can resolve it to a record.
pub type Metadata = BTreeMap<String, Value>;

/// Category tags emitted by the catalog indexer.
pub mod category {
    pub const ITEM: &str = "item";
    pub const ITEM_KEY: &str = "item-key";
    pub const PART: &str = "part";
    pub const PART_KEY: &str = "part-key";
}

fn default_score() -> f32 {
    1.0
}

/// One indexed entry. Two results with the same `(id, category)` are the same logical entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub text: String,
    #[serde(alias = "type")]
    pub category: String,
    #[serde(default = "default_score")]
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Deduplication identity of a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultKey {
    pub id: String,
    pub category: String,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), category: category.into(), score: 1.0, metadata: None }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn key(&self) -> ResultKey {
        ResultKey { id: self.id.clone(), category: self.category.clone() }
    }

    pub fn same_entry(&self, other: &SearchResult) -> bool {
        self.id == other.id && self.category == other.category
    }

    /// Copy of this result with its score multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut out = self.clone();
        out.score *= factor;
        out
    }
}

/// Append `result` unless an entry with the same `(id, category)` is already present.
/// Returns whether it was appended.
pub fn push_unique(results: &mut Vec<SearchResult>, result: SearchResult) -> bool {
    if results.iter().any(|r| r.same_entry(&result)) {
        return false;
    }
    results.push(result);
    true
}
