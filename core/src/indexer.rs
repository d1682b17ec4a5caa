use crate::error::SourceError;
use crate::index::{category, Metadata, SearchResult};
use crate::snapshot::Snapshot;
use crate::source::{CatalogScan, CatalogSource, Item, Part};
use serde_json::Value;

/// Insert counts from one build pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub items: usize,
    pub parts: usize,
    pub entries: usize,
}

/// Turns catalog records into snapshot entries.
pub struct Indexer<'a> {
    source: &'a dyn CatalogSource,
}

impl<'a> Indexer<'a> {
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self { source }
    }

    /// Scan the source once and insert every indexable field into `snapshot`.
    pub fn populate(&self, snapshot: &mut Snapshot) -> Result<IndexReport, SourceError> {
        let scan = self.source.scan()?;
        Ok(index_scan(&scan, snapshot))
    }
}

pub fn index_scan(scan: &CatalogScan, snapshot: &mut Snapshot) -> IndexReport {
    let mut report = IndexReport { items: scan.items.len(), parts: scan.parts.len(), entries: 0 };
    for item in &scan.items {
        report.entries += index_item(item, snapshot);
    }
    for part in &scan.parts {
        report.entries += index_part(part, snapshot);
    }
    report
}

fn string(v: &str) -> Value {
    Value::String(v.to_string())
}

fn opt_string(v: Option<&str>) -> Value {
    v.map(string).unwrap_or(Value::Null)
}

fn index_item(item: &Item, snapshot: &mut Snapshot) -> usize {
    let mut n = 0;
    if !item.name.is_empty() {
        let mut meta = Metadata::new();
        meta.insert("slug".into(), string(&item.slug));
        meta.insert("category_label".into(), opt_string(item.category_label.as_deref()));
        snapshot.insert(&item.name, SearchResult::new(&item.id, &item.name, category::ITEM).with_metadata(meta));
        n += 1;
    }
    if !item.slug.is_empty() {
        let mut meta = Metadata::new();
        meta.insert("name".into(), string(&item.name));
        meta.insert("category_label".into(), opt_string(item.category_label.as_deref()));
        snapshot.insert(&item.slug, SearchResult::new(&item.id, &item.slug, category::ITEM_KEY).with_metadata(meta));
        n += 1;
    }
    n
}

fn parent_metadata(part: &Part) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("parent_id".into(), string(&part.parent_id));
    meta.insert("parent_name".into(), string(&part.parent_name));
    meta.insert("parent_slug".into(), string(&part.parent_slug));
    meta
}

fn index_part(part: &Part, snapshot: &mut Snapshot) -> usize {
    let mut n = 0;
    if !part.name.is_empty() {
        let mut meta = parent_metadata(part);
        meta.insert("code".into(), string(&part.code));
        snapshot.insert(&part.name, SearchResult::new(&part.id, &part.name, category::PART).with_metadata(meta));
        n += 1;
    }
    if !part.code.is_empty() {
        let mut meta = parent_metadata(part);
        meta.insert("part_name".into(), string(&part.name));
        snapshot.insert(&part.code, SearchResult::new(&part.id, &part.code, category::PART_KEY).with_metadata(meta));
        n += 1;
    }
    n
}
