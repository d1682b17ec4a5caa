//! Reacts to catalog mutations by discarding the cached snapshot.
//!
//! Every notification clears the whole index regardless of entity or operation;
//! the next query rebuilds it.

use crate::engine::SearchEngine;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityClass {
    Item,
    Part,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity: EntityClass,
    pub entity_id: String,
    pub operation: ChangeOp,
}

impl ChangeEvent {
    pub fn new(entity: EntityClass, entity_id: impl Into<String>, operation: ChangeOp) -> Self {
        Self { entity, entity_id: entity_id.into(), operation }
    }
}

pub struct InvalidationListener {
    engine: Arc<SearchEngine>,
}

impl InvalidationListener {
    pub fn new(engine: Arc<SearchEngine>) -> Self {
        Self { engine }
    }

    /// The in-process index is dropped even when the error reports that the
    /// cache entry could not be deleted.
    pub fn on_change(&self, event: &ChangeEvent) -> Result<()> {
        let cleared = self.engine.clear_cache();
        tracing::info!(
            entity = ?event.entity,
            entity_id = %event.entity_id,
            operation = ?event.operation,
            "search index invalidated by catalog change"
        );
        cleared
    }

    /// Run a listener on its own thread. It drains the channel until every
    /// sender is dropped.
    pub fn spawn(engine: Arc<SearchEngine>) -> io::Result<(Sender<ChangeEvent>, JoinHandle<()>)> {
        let (tx, rx) = mpsc::channel();
        let listener = Self::new(engine);
        let handle = thread::Builder::new().name("search-invalidation".into()).spawn(move || listener.run(rx))?;
        Ok((tx, handle))
    }

    fn run(&self, rx: Receiver<ChangeEvent>) {
        for event in rx {
            if let Err(e) = self.on_change(&event) {
                tracing::warn!(error = %e, entity_id = %event.entity_id, "stale search index may remain cached");
            }
        }
        tracing::debug!("invalidation listener stopped");
    }
}
