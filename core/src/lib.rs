//! In-process type-ahead and keyword search over a catalog.
//!
//! A [`Snapshot`] combines a prefix [`Trie`] with token and full-text indexes.
//! [`SearchEngine`] builds snapshots from a [`CatalogSource`], persists them through a
//! [`SnapshotCache`] and serves prefix, keyword and hybrid queries from the active one.
//! [`InvalidationListener`] discards the snapshot whenever the catalog changes.

pub mod cache;
pub mod engine;
pub mod error;
pub mod index;
pub mod indexer;
pub mod invalidation;
pub mod persist;
pub mod ranking;
pub mod snapshot;
pub mod source;
pub mod text_index;
pub mod tokenizer;
pub mod trie;

pub use cache::{MemoryCache, SledCache, SnapshotCache};
pub use engine::{BuildOutcome, EngineConfig, IndexStats, SearchEngine};
pub use error::{CacheError, Result, SearchError, SerializationError, SourceError};
pub use index::{category, Metadata, ResultKey, SearchResult};
pub use indexer::{IndexReport, Indexer};
pub use invalidation::{ChangeEvent, ChangeOp, EntityClass, InvalidationListener};
pub use ranking::{PrefixRanking, RankingConfig};
pub use snapshot::Snapshot;
pub use source::{CatalogScan, CatalogSource, InMemoryCatalog, Item, JsonCatalog, Part};
pub use trie::{Trie, TrieCounts, TrieNode};
