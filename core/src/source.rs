//! Catalog data source boundary: the system of record the indexer scans.

use crate::error::SourceError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A primary catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category_label: Option<String>,
}

/// A sub-item bound to a parent [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub parent_id: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub parent_slug: String,
}

/// Everything one build pass reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogScan {
    pub items: Vec<Item>,
    pub parts: Vec<Part>,
}

pub trait CatalogSource: Send + Sync {
    fn list_items(&self) -> Result<Vec<Item>, SourceError>;
    fn list_parts(&self) -> Result<Vec<Part>, SourceError>;

    /// Items and parts from one consistent read. Sources that can offer a
    /// transaction or a single pass over their storage should override this.
    fn scan(&self) -> Result<CatalogScan, SourceError> {
        Ok(CatalogScan { items: self.list_items()?, parts: self.list_parts()? })
    }
}

/// Mutable in-memory catalog for hosts that already hold their records.
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogScan>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(items: Vec<Item>, parts: Vec<Part>) -> Self {
        Self { inner: RwLock::new(CatalogScan { items, parts }) }
    }

    /// Insert or replace an item by id.
    pub fn upsert_item(&self, item: Item) {
        let mut inner = self.inner.write();
        inner.items.retain(|i| i.id != item.id);
        inner.items.push(item);
    }

    /// Insert or replace a part by id.
    pub fn upsert_part(&self, part: Part) {
        let mut inner = self.inner.write();
        inner.parts.retain(|p| p.id != part.id);
        inner.parts.push(part);
    }

    pub fn remove_item(&self, id: &str) {
        self.inner.write().items.retain(|i| i.id != id);
    }

    pub fn remove_part(&self, id: &str) {
        self.inner.write().parts.retain(|p| p.id != id);
    }
}

impl CatalogSource for InMemoryCatalog {
    fn list_items(&self) -> Result<Vec<Item>, SourceError> {
        Ok(self.inner.read().items.clone())
    }

    fn list_parts(&self) -> Result<Vec<Part>, SourceError> {
        Ok(self.inner.read().parts.clone())
    }

    fn scan(&self) -> Result<CatalogScan, SourceError> {
        Ok(self.inner.read().clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum CatalogRecord {
    Item(Item),
    Part(Part),
}

/// Catalog exported as `.json` (array or single object) and `.jsonl` files, each
/// record tagged with `"kind": "item"` or `"kind": "part"`. The root may be a
/// single file or a directory walked recursively.
pub struct JsonCatalog {
    root: PathBuf,
}

impl JsonCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files = Vec::new();
        if self.root.is_dir() {
            for entry in WalkDir::new(&self.root).sort_by_file_name() {
                let entry = entry.map_err(|e| SourceError::Scan(e.to_string()))?;
                let p = entry.path();
                if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                    files.push(p.to_path_buf());
                }
            }
        } else if self.root.is_file() {
            files.push(self.root.clone());
        } else {
            return Err(SourceError::Scan(format!("catalog path {} does not exist", self.root.display())));
        }
        Ok(files)
    }
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

fn io_err(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io { path: path.display().to_string(), source }
}

fn record_err(path: &Path, source: serde_json::Error) -> SourceError {
    SourceError::Record { path: path.display().to_string(), source }
}

fn push_record(scan: &mut CatalogScan, record: CatalogRecord) {
    match record {
        CatalogRecord::Item(item) => scan.items.push(item),
        CatalogRecord::Part(part) => scan.parts.push(part),
    }
}

fn read_jsonl(file: &Path, scan: &mut CatalogScan) -> Result<(), SourceError> {
    let reader = BufReader::new(File::open(file).map_err(|e| io_err(file, e))?);
    for line in reader.lines() {
        let line = line.map_err(|e| io_err(file, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: CatalogRecord = serde_json::from_str(&line).map_err(|e| record_err(file, e))?;
        push_record(scan, record);
    }
    Ok(())
}

fn read_json(file: &Path, scan: &mut CatalogScan) -> Result<(), SourceError> {
    let reader = BufReader::new(File::open(file).map_err(|e| io_err(file, e))?);
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(|e| record_err(file, e))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                push_record(scan, serde_json::from_value(v).map_err(|e| record_err(file, e))?);
            }
        }
        serde_json::Value::Object(_) => {
            push_record(scan, serde_json::from_value(json).map_err(|e| record_err(file, e))?);
        }
        _ => {}
    }
    Ok(())
}

impl CatalogSource for JsonCatalog {
    fn list_items(&self) -> Result<Vec<Item>, SourceError> {
        Ok(self.scan()?.items)
    }

    fn list_parts(&self) -> Result<Vec<Part>, SourceError> {
        Ok(self.scan()?.parts)
    }

    fn scan(&self) -> Result<CatalogScan, SourceError> {
        let mut scan = CatalogScan::default();
        for file in self.files()? {
            if extension(&file) == Some("jsonl") {
                read_jsonl(&file, &mut scan)?;
            } else {
                read_json(&file, &mut scan)?;
            }
        }
        tracing::debug!(root = %self.root.display(), items = scan.items.len(), parts = scan.parts.len(), "catalog scanned");
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn json_catalog_reads_json_and_jsonl() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("items.json"),
            r#"[{"kind":"item","id":"1","name":"White Tee","slug":"white-tee","category_label":"Apparel"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("parts.jsonl"),
            "{\"kind\":\"part\",\"id\":\"10\",\"name\":\"White Tee / M\",\"code\":\"WT-M\",\"parent_id\":\"1\",\"parent_name\":\"White Tee\",\"parent_slug\":\"white-tee\"}\n\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let scan = JsonCatalog::new(dir.path()).scan().unwrap();
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].category_label.as_deref(), Some("Apparel"));
        assert_eq!(scan.parts.len(), 1);
        assert_eq!(scan.parts[0].code, "WT-M");
    }

    #[test]
    fn json_catalog_reports_bad_records() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.jsonl"), "{\"kind\":\"gadget\"}\n").unwrap();
        let err = JsonCatalog::new(dir.path()).scan().unwrap_err();
        assert!(matches!(err, SourceError::Record { .. }));
        let err = JsonCatalog::new(dir.path().join("missing")).scan().unwrap_err();
        assert!(matches!(err, SourceError::Scan(_)));
    }

    #[test]
    fn in_memory_catalog_upserts_by_id() {
        let catalog = InMemoryCatalog::new();
        let mut item = Item { id: "1".into(), name: "Tee".into(), slug: "tee".into(), category_label: None };
        catalog.upsert_item(item.clone());
        item.name = "Long Tee".into();
        catalog.upsert_item(item);
        let items = catalog.list_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Long Tee");
        catalog.remove_item("1");
        assert!(catalog.scan().unwrap().items.is_empty());
    }
}
