//! Per-document result cache.
//!
//! The cache is owned by whoever is told about document lifecycle (an
//! editor host, a long-running server) and passed by handle into the
//! detection entry point; there is no process-wide singleton. A mutation
//! notification for one document must invalidate only that document's
//! entry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::detect::KeyInDocument;

#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: HashMap<PathBuf, Vec<KeyInDocument>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&[KeyInDocument]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, keys: Vec<KeyInDocument>) {
        self.entries.insert(path.into(), keys);
    }

    /// Drop the entry for a single document, e.g. on a mutation event.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
