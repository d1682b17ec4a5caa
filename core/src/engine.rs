//! Search service owning the active snapshot and its cache/data-source lifecycle.

use crate::cache::SnapshotCache;
use crate::error::Result;
use crate::index::SearchResult;
use crate::indexer::{IndexReport, Indexer};
use crate::persist;
use crate::ranking::RankingConfig;
use crate::snapshot::Snapshot;
use crate::source::CatalogSource;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_KEY: &str = "trie_search_index";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub cache_key: String,
    pub cache_ttl: Duration,
    pub default_limit: usize,
    /// Trimmed queries with fewer characters return nothing.
    pub min_query_chars: usize,
    pub ranking: RankingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            default_limit: DEFAULT_LIMIT,
            min_query_chars: 2,
            ranking: RankingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub loaded: bool,
    pub total_nodes: usize,
    pub terminal_nodes: usize,
    pub cache_key: String,
}

/// What a call to [`SearchEngine::build_index`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A loaded snapshot was already active.
    AlreadyLoaded,
    /// The snapshot came from the cache.
    FromCache,
    /// The snapshot was built from the data source.
    Built(IndexReport),
}

/// The served snapshot and its freshness, changed together under one lock.
#[derive(Default)]
struct ActiveState {
    snapshot: Option<Arc<Snapshot>>,
    loaded: bool,
    /// Bumped by every invalidation so an in-flight build or load can tell it went stale.
    generation: u64,
}

/// Concurrent readers share the active snapshot through an `Arc`; builds are
/// serialized by `build_lock` and publish a new snapshot with a single swap.
///
/// Lock order is `build_lock`, then `persist_lock`, then `active`.
pub struct SearchEngine {
    source: Arc<dyn CatalogSource>,
    cache: Arc<dyn SnapshotCache>,
    config: EngineConfig,
    active: RwLock<ActiveState>,
    build_lock: Mutex<()>,
    /// Held across every cache read, write and delete of the snapshot entry, so a
    /// save can never land after the invalidation that made it stale.
    persist_lock: Mutex<()>,
}

impl SearchEngine {
    /// Create the engine and try to restore a snapshot from the cache.
    pub fn new(source: Arc<dyn CatalogSource>, cache: Arc<dyn SnapshotCache>, config: EngineConfig) -> Self {
        let engine = Self {
            source,
            cache,
            config,
            active: RwLock::new(ActiveState::default()),
            build_lock: Mutex::new(()),
            persist_lock: Mutex::new(()),
        };
        engine.load_from_cache();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.active.read().loaded
    }

    /// The snapshot currently served, possibly stale, or an empty one.
    pub fn current(&self) -> Arc<Snapshot> {
        self.active.read().snapshot.clone().unwrap_or_default()
    }

    fn load_from_cache(&self) -> bool {
        let (generation, bytes) = {
            let _persist = self.persist_lock.lock();
            let generation = self.active.read().generation;
            match self.cache.get(&self.config.cache_key) {
                Ok(Some(bytes)) => (generation, bytes),
                Ok(None) => return false,
                Err(e) => {
                    tracing::warn!(error = %e, key = %self.config.cache_key, "failed to read search index from cache");
                    return false;
                }
            }
        };
        let snapshot = match persist::decode(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.config.cache_key, "cached search index is unreadable, rebuilding");
                return false;
            }
        };

        let mut state = self.active.write();
        if state.generation != generation {
            tracing::info!(key = %self.config.cache_key, "search index invalidated while loading from cache, discarding it");
            return false;
        }
        state.snapshot = Some(Arc::new(snapshot));
        state.loaded = true;
        tracing::info!(key = %self.config.cache_key, bytes = bytes.len(), "search index loaded from cache");
        true
    }

    /// Caller holds `persist_lock`.
    fn save_to_cache(&self, snapshot: &Snapshot) {
        let bytes = match persist::encode(snapshot) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode search index, serving it unpersisted");
                return;
            }
        };
        match self.cache.set(&self.config.cache_key, &bytes, self.config.cache_ttl) {
            Ok(()) => tracing::info!(key = %self.config.cache_key, bytes = bytes.len(), "search index saved to cache"),
            Err(e) => tracing::warn!(error = %e, key = %self.config.cache_key, "failed to save search index to cache"),
        }
    }

    /// Build a fresh snapshot unless one is loaded and `force_rebuild` is false.
    ///
    /// Only one build runs at a time; concurrent callers wait for it and then
    /// find the index loaded. A failed scan leaves the previous snapshot serving.
    /// A build overtaken by [`clear_cache`](Self::clear_cache) is served but left
    /// unloaded and is not written to the cache.
    pub fn build_index(&self, force_rebuild: bool) -> Result<BuildOutcome> {
        let _guard = self.build_lock.lock();
        if self.is_loaded() && !force_rebuild {
            return Ok(BuildOutcome::AlreadyLoaded);
        }
        if !force_rebuild && self.load_from_cache() {
            return Ok(BuildOutcome::FromCache);
        }

        let generation = self.active.read().generation;
        let start = Instant::now();
        tracing::info!(force_rebuild, "building search index");

        let mut snapshot = Snapshot::new();
        let report = match Indexer::new(self.source.as_ref()).populate(&mut snapshot) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "failed to build search index");
                return Err(e.into());
            }
        };

        let snapshot = Arc::new(snapshot);
        let counts = snapshot.counts();
        {
            let _persist = self.persist_lock.lock();
            let current = {
                let mut state = self.active.write();
                let current = state.generation == generation;
                state.snapshot = Some(snapshot.clone());
                state.loaded = current;
                current
            };
            if current {
                self.save_to_cache(&snapshot);
            } else {
                // serve it, but rebuild on the next query
                tracing::info!("search index invalidated during build, leaving it unloaded");
            }
        }

        tracing::info!(
            items = report.items,
            parts = report.parts,
            entries = report.entries,
            total_nodes = counts.total_nodes,
            terminal_nodes = counts.terminal_nodes,
            took_s = start.elapsed().as_secs_f64(),
            "search index built"
        );
        Ok(BuildOutcome::Built(report))
    }

    /// Drop the active snapshot and delete the cache entry. Does not rebuild;
    /// in-flight readers keep the snapshot they already hold.
    ///
    /// The in-process index is invalidated even when the delete fails; the error
    /// reports that a stale entry may still be in the cache.
    pub fn clear_cache(&self) -> Result<()> {
        let _persist = self.persist_lock.lock();
        {
            let mut state = self.active.write();
            state.generation += 1;
            state.loaded = false;
            state.snapshot = None;
        }
        if let Err(e) = self.cache.delete(&self.config.cache_key) {
            tracing::warn!(error = %e, key = %self.config.cache_key, "failed to delete search index from cache");
            return Err(e.into());
        }
        tracing::info!(key = %self.config.cache_key, "search index cache cleared");
        Ok(())
    }

    /// Encoded form of the loaded snapshot, building it first if needed.
    pub fn export_snapshot(&self) -> Result<Vec<u8>> {
        self.build_index(false)?;
        Ok(persist::encode(&self.current())?)
    }

    /// Snapshot to answer a query with, building one first if none is loaded.
    fn serving_snapshot(&self) -> Arc<Snapshot> {
        if !self.is_loaded() {
            if let Err(e) = self.build_index(false) {
                tracing::error!(error = %e, "search index unavailable, serving previous snapshot");
            }
        }
        self.current()
    }

    /// Query API. Never fails: internal faults are logged and yield no results.
    pub fn search(&self, query: &str, limit: usize, categories: Option<&HashSet<String>>) -> Vec<SearchResult> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_chars {
            return Vec::new();
        }
        let limit = if limit == 0 { self.config.default_limit } else { limit.min(MAX_LIMIT) };

        let snapshot = self.serving_snapshot();
        let mut results = snapshot.hybrid_search(query, limit, self.config.ranking.prefer_prefix, &self.config.ranking);
        if let Some(categories) = categories {
            results.retain(|r| categories.contains(&r.category));
        }
        results
    }

    pub fn prefix_search(&self, prefix: &str, limit: usize) -> Vec<SearchResult> {
        self.serving_snapshot().prefix_search(prefix, limit, &self.config.ranking)
    }

    pub fn keyword_search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.serving_snapshot().keyword_search(query, limit, &self.config.ranking)
    }

    pub fn prefix_or_substring_search(&self, prefix: &str, limit: usize, include_substring: bool) -> Vec<SearchResult> {
        self.serving_snapshot().prefix_or_substring_search(prefix, limit, include_substring, &self.config.ranking)
    }

    pub fn hybrid_search(&self, query: &str, limit: usize, prefer_prefix: bool) -> Vec<SearchResult> {
        self.serving_snapshot().hybrid_search(query, limit, prefer_prefix, &self.config.ranking)
    }

    pub fn stats(&self) -> IndexStats {
        let counts = self.current().counts();
        IndexStats {
            loaded: self.is_loaded(),
            total_nodes: counts.total_nodes,
            terminal_nodes: counts.terminal_nodes,
            cache_key: self.config.cache_key.clone(),
        }
    }

    /// Drop the active snapshot and flush the cache backend.
    pub fn shutdown(&self) {
        let _guard = self.build_lock.lock();
        {
            let mut state = self.active.write();
            state.loaded = false;
            state.snapshot = None;
        }
        if let Err(e) = self.cache.flush() {
            tracing::warn!(error = %e, "failed to flush search index cache on shutdown");
        }
        tracing::info!("search engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::{SearchError, SourceError};
    use crate::error::CacheError;
    use crate::source::{CatalogScan, InMemoryCatalog, Item, Part};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::mpsc;

    fn item(id: &str, name: &str) -> Item {
        Item { id: id.into(), name: name.into(), slug: name.to_lowercase().replace(' ', "-"), category_label: None }
    }

    /// Counts scans and can be switched to fail.
    struct Flaky {
        inner: InMemoryCatalog,
        scans: AtomicUsize,
        fail: AtomicBool,
    }

    impl CatalogSource for Flaky {
        fn list_items(&self) -> std::result::Result<Vec<Item>, SourceError> {
            self.inner.list_items()
        }

        fn list_parts(&self) -> std::result::Result<Vec<Part>, SourceError> {
            self.inner.list_parts()
        }

        fn scan(&self) -> std::result::Result<CatalogScan, SourceError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(SourceError::Scan("database offline".into()));
            }
            self.inner.scan()
        }
    }

    fn flaky(items: Vec<Item>) -> Arc<Flaky> {
        Arc::new(Flaky {
            inner: InMemoryCatalog::with_records(items, Vec::new()),
            scans: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    #[test]
    fn first_query_builds_and_persists() {
        let source = flaky(vec![item("1", "Apple"), item("2", "Application")]);
        let cache = Arc::new(MemoryCache::new());
        let engine = SearchEngine::new(source.clone(), cache.clone(), EngineConfig::default());
        assert!(!engine.is_loaded());

        let results = engine.search("app", 10, None);
        assert!(!results.is_empty());
        assert!(engine.is_loaded());
        assert_eq!(source.scans.load(Ordering::SeqCst), 1);
        assert!(cache.get(DEFAULT_CACHE_KEY).unwrap().is_some());

        engine.search("apple", 10, None);
        assert_eq!(source.scans.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_engine_loads_from_cache() {
        let source = flaky(vec![item("1", "Apple")]);
        let cache = Arc::new(MemoryCache::new());
        SearchEngine::new(source.clone(), cache.clone(), EngineConfig::default()).build_index(false).unwrap();

        let engine = SearchEngine::new(source.clone(), cache, EngineConfig::default());
        assert!(engine.is_loaded());
        assert_eq!(engine.search("apple", 10, None)[0].id, "1");
        assert_eq!(source.scans.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn short_queries_return_nothing() {
        let engine = SearchEngine::new(flaky(vec![item("1", "Apple")]), Arc::new(MemoryCache::new()), EngineConfig::default());
        assert!(engine.search("", 10, None).is_empty());
        assert!(engine.search("   ", 10, None).is_empty());
        assert!(engine.search(" a ", 10, None).is_empty());
    }

    #[test]
    fn categories_filter_after_ranking() {
        let engine = SearchEngine::new(flaky(vec![item("1", "White Tee")]), Arc::new(MemoryCache::new()), EngineConfig::default());
        let all = engine.search("white", 10, None);
        assert_eq!(all.len(), 2);
        let only: HashSet<String> = ["item-key".to_string()].into_iter().collect();
        let filtered = engine.search("white", 10, Some(&only));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category, "item-key");
    }

    #[test]
    fn clear_cache_forces_rebuild_on_next_query() {
        let source = flaky(vec![item("1", "Apple")]);
        let cache = Arc::new(MemoryCache::new());
        let engine = SearchEngine::new(source.clone(), cache.clone(), EngineConfig::default());
        engine.build_index(false).unwrap();

        engine.clear_cache().unwrap();
        assert!(!engine.is_loaded());
        assert!(cache.get(DEFAULT_CACHE_KEY).unwrap().is_none());
        assert_eq!(engine.stats().total_nodes, 1);

        source.inner.upsert_item(item("2", "Apricot"));
        let results = engine.search("apr", 10, None);
        assert_eq!(results[0].id, "2");
        assert_eq!(source.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_build_keeps_previous_snapshot() {
        let source = flaky(vec![item("1", "Apple")]);
        let engine = SearchEngine::new(source.clone(), Arc::new(MemoryCache::new()), EngineConfig::default());
        engine.build_index(false).unwrap();

        source.fail.store(true, Ordering::SeqCst);
        let err = engine.build_index(true).unwrap_err();
        assert!(matches!(err, SearchError::DataSource(_)));
        assert!(engine.is_loaded());
        assert_eq!(engine.search("apple", 10, None)[0].id, "1");
    }

    #[test]
    fn search_swallows_build_failures() {
        let source = flaky(vec![item("1", "Apple")]);
        source.fail.store(true, Ordering::SeqCst);
        let engine = SearchEngine::new(source, Arc::new(MemoryCache::new()), EngineConfig::default());
        assert!(engine.search("apple", 10, None).is_empty());
        assert!(!engine.is_loaded());
    }

    #[test]
    fn build_is_a_noop_when_loaded() {
        let source = flaky(vec![item("1", "Apple")]);
        let engine = SearchEngine::new(source.clone(), Arc::new(MemoryCache::new()), EngineConfig::default());
        assert!(matches!(engine.build_index(false).unwrap(), BuildOutcome::Built(_)));
        assert_eq!(engine.build_index(false).unwrap(), BuildOutcome::AlreadyLoaded);
        assert!(matches!(engine.build_index(true).unwrap(), BuildOutcome::Built(_)));
        assert_eq!(source.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stats_report_node_counts() {
        let engine = SearchEngine::new(flaky(vec![item("1", "ab")]), Arc::new(MemoryCache::new()), EngineConfig::default());
        engine.build_index(false).unwrap();
        let stats = engine.stats();
        assert!(stats.loaded);
        // root, a, b; the slug "ab" lands on the same path
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.terminal_nodes, 1);
        assert_eq!(stats.cache_key, DEFAULT_CACHE_KEY);
    }

    #[test]
    fn concurrent_queries_build_once() {
        let source = flaky((0..50).map(|i| item(&i.to_string(), &format!("Product {i}"))).collect());
        let engine = Arc::new(SearchEngine::new(source.clone(), Arc::new(MemoryCache::new()), EngineConfig::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.search("product", 5, None).len())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 5);
        }
        assert_eq!(source.scans.load(Ordering::SeqCst), 1);
    }

    /// Parks the first caller until the test lets it through.
    struct Gate {
        entered: Mutex<Option<mpsc::Sender<()>>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl Gate {
        fn new() -> (Gate, mpsc::Receiver<()>, mpsc::Sender<()>) {
            let (entered_tx, entered_rx) = mpsc::channel();
            let (release_tx, release_rx) = mpsc::channel();
            let gate = Gate { entered: Mutex::new(Some(entered_tx)), release: Mutex::new(release_rx) };
            (gate, entered_rx, release_tx)
        }

        fn pass(&self) {
            let entered = self.entered.lock().take();
            if let Some(entered) = entered {
                entered.send(()).ok();
                self.release.lock().recv().ok();
            }
        }
    }

    /// Memory cache whose first write waits at a gate.
    struct GatedCache {
        inner: MemoryCache,
        gate: Gate,
    }

    impl SnapshotCache for GatedCache {
        fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, CacheError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8], ttl: Duration) -> std::result::Result<(), CacheError> {
            self.gate.pass();
            self.inner.set(key, value, ttl)
        }

        fn delete(&self, key: &str) -> std::result::Result<(), CacheError> {
            self.inner.delete(key)
        }
    }

    /// Catalog whose first scan waits at a gate.
    struct GatedSource {
        inner: InMemoryCatalog,
        gate: Gate,
    }

    impl CatalogSource for GatedSource {
        fn list_items(&self) -> std::result::Result<Vec<Item>, SourceError> {
            self.inner.list_items()
        }

        fn list_parts(&self) -> std::result::Result<Vec<Part>, SourceError> {
            self.inner.list_parts()
        }

        fn scan(&self) -> std::result::Result<CatalogScan, SourceError> {
            self.gate.pass();
            self.inner.scan()
        }
    }

    /// Cache that stores nothing and refuses deletes.
    struct ReadOnlyCache;

    impl SnapshotCache for ReadOnlyCache {
        fn get(&self, _key: &str) -> std::result::Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> std::result::Result<(), CacheError> {
            Ok(())
        }

        fn delete(&self, _key: &str) -> std::result::Result<(), CacheError> {
            Err(sled::Error::Unsupported("cache is read-only".into()).into())
        }
    }

    #[test]
    fn clear_during_cache_write_leaves_nothing_cached() {
        let (gate, entered, release) = Gate::new();
        let cache = Arc::new(GatedCache { inner: MemoryCache::new(), gate });
        let source = flaky(vec![item("1", "Apple")]);
        let engine = Arc::new(SearchEngine::new(source.clone(), cache.clone(), EngineConfig::default()));

        let builder = {
            let engine = engine.clone();
            std::thread::spawn(move || engine.build_index(false))
        };
        entered.recv().unwrap();
        let clearer = {
            let engine = engine.clone();
            std::thread::spawn(move || engine.clear_cache())
        };
        std::thread::sleep(Duration::from_millis(50));
        release.send(()).unwrap();

        assert!(matches!(builder.join().unwrap().unwrap(), BuildOutcome::Built(_)));
        clearer.join().unwrap().unwrap();
        assert!(!engine.is_loaded());
        assert!(cache.get(DEFAULT_CACHE_KEY).unwrap().is_none());

        source.inner.upsert_item(item("2", "Apricot"));
        assert_eq!(engine.search("apr", 10, None)[0].id, "2");
        assert!(engine.is_loaded());
    }

    #[test]
    fn clear_during_scan_leaves_index_unloaded_and_uncached() {
        let (gate, entered, release) = Gate::new();
        let source = Arc::new(GatedSource { inner: InMemoryCatalog::with_records(vec![item("1", "Apple")], Vec::new()), gate });
        let cache = Arc::new(MemoryCache::new());
        let engine = Arc::new(SearchEngine::new(source.clone(), cache.clone(), EngineConfig::default()));

        let builder = {
            let engine = engine.clone();
            std::thread::spawn(move || engine.build_index(false))
        };
        entered.recv().unwrap();
        engine.clear_cache().unwrap();
        release.send(()).unwrap();

        assert!(matches!(builder.join().unwrap().unwrap(), BuildOutcome::Built(_)));
        assert!(!engine.is_loaded());
        assert!(cache.is_empty());
        // the stale build still answers until the next rebuild
        assert!(engine.stats().total_nodes > 1);
        assert_eq!(engine.current().prefix_search("app", 10, &RankingConfig::default())[0].id, "1");

        assert!(matches!(engine.build_index(false).unwrap(), BuildOutcome::Built(_)));
        assert!(engine.is_loaded());
        assert!(!cache.is_empty());
    }

    #[test]
    fn clear_cache_reports_delete_failures() {
        let engine = SearchEngine::new(flaky(vec![item("1", "Apple")]), Arc::new(ReadOnlyCache), EngineConfig::default());
        engine.build_index(false).unwrap();

        let err = engine.clear_cache().unwrap_err();
        assert!(matches!(err, SearchError::CacheUnavailable(_)));
        assert!(err.is_retriable());
        assert!(!engine.is_loaded());
        assert_eq!(engine.stats().total_nodes, 1);
    }

    #[test]
    fn export_builds_and_encodes_the_index() {
        let source = flaky(vec![item("1", "Apple")]);
        let engine = SearchEngine::new(source.clone(), Arc::new(MemoryCache::new()), EngineConfig::default());
        let bytes = engine.export_snapshot().unwrap();
        assert!(engine.is_loaded());
        assert_eq!(persist::decode(&bytes).unwrap(), *engine.current());

        source.fail.store(true, Ordering::SeqCst);
        engine.clear_cache().unwrap();
        assert!(matches!(engine.export_snapshot(), Err(SearchError::DataSource(_))));
    }

    #[test]
    fn part_changes_show_up_after_invalidation() {
        let catalog = Arc::new(InMemoryCatalog::with_records(vec![item("1", "Bike")], Vec::new()));
        let engine = SearchEngine::new(catalog.clone(), Arc::new(MemoryCache::new()), EngineConfig::default());
        assert!(engine.search("bk-", 10, None).is_empty());

        catalog.upsert_part(Part {
            id: "7".into(),
            name: "Brake Pad".into(),
            code: "BK-7".into(),
            parent_id: "1".into(),
            parent_name: "Bike".into(),
            parent_slug: "bike".into(),
        });
        engine.clear_cache().unwrap();
        let hits = engine.search("bk-", 10, None);
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].id.as_str(), hits[0].category.as_str()), ("7", "part-key"));

        catalog.remove_part("7");
        engine.clear_cache().unwrap();
        assert!(engine.search("brake", 10, None).is_empty());
        assert!(engine.search("bk-", 10, None).is_empty());
    }
}
