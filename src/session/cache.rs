//! Select result cache
//!
//! Maps `(table, predicate)` to the records a select returned. Entries for a
//! table are dropped whenever that table is created, dropped or mutated.

use std::collections::HashMap;

use tracing::debug;

use crate::storage::{Predicate, Record};

/// Cache key: one select against one table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub table_name: String,
    pub predicate: Option<Predicate>,
}

impl CacheKey {
    pub fn new(table_name: impl Into<String>, predicate: Option<Predicate>) -> Self {
        Self {
            table_name: table_name.into(),
            predicate,
        }
    }
}

/// Memoized select results
#[derive(Debug, Default)]
pub struct SelectCache {
    entries: HashMap<CacheKey, Vec<Record>>,
}

impl SelectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records for a key, if any
    pub fn get(&self, key: &CacheKey) -> Option<&[Record]> {
        let hit = self.entries.get(key).map(Vec::as_slice);
        debug!(
            table = %key.table_name,
            hit = hit.is_some(),
            "select cache lookup"
        );
        hit
    }

    pub fn insert(&mut self, key: CacheKey, records: Vec<Record>) {
        self.entries.insert(key, records);
    }

    /// Drop every entry for a table
    pub fn invalidate(&mut self, table_name: &str) {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.table_name != table_name);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(table = table_name, removed, "select cache invalidated");
        }
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
