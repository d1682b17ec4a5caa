//! Key/value store with TTL holding serialized snapshots.

use crate::error::CacheError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};
use time::OffsetDateTime;

pub trait SnapshotCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Push buffered writes to durable storage, if the backend buffers.
    fn flush(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Process-local cache.
#[derive(Default)]
pub struct MemoryCache {
    /// `None` expiry: the TTL reaches past what `Instant` can represent.
    entries: Mutex<HashMap<String, (Option<Instant>, Vec<u8>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((Some(expires), _)) if *expires <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((_, value)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let expires = Instant::now().checked_add(ttl);
        self.entries.lock().insert(key.to_string(), (expires, value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    /// Unix seconds after which the entry reads as absent.
    expires_at: i64,
    payload: Vec<u8>,
}

/// Cache persisted in a sled tree so snapshots survive process restarts.
pub struct SledCache {
    db: sled::Db,
}

impl SledCache {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        Ok(Self { db: sled::open(path)? })
    }
}

fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl SnapshotCache for SledCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let Some(raw) = self.db.get(key)? else {
            return Ok(None);
        };
        let envelope: Envelope = bincode::deserialize(&raw)?;
        if envelope.expires_at <= now_unix() {
            self.db.remove(key)?;
            return Ok(None);
        }
        Ok(Some(envelope.payload))
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let envelope = Envelope { expires_at: now_unix().saturating_add(ttl_secs), payload: value.to_vec() };
        self.db.insert(key, bincode::serialize(&envelope)?)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.db.remove(key)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), CacheError> {
        self.db.flush()?;
        Ok(())
    }
}
