//! In-memory storage
//!
//! Keeps the catalog and table stores as values. Used by tests and by
//! `--in-memory` sessions; nothing survives the process.

use std::collections::HashMap;

use super::table::TableStore;
use super::{Storage, TableLoader};
use crate::catalog::Catalog;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    catalog: Catalog,
    tables: HashMap<String, TableStore>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableLoader for MemoryStorage {
    fn load_table_records(&self, name: &str) -> Result<TableStore> {
        Ok(self.tables.get(name).cloned().unwrap_or_default())
    }

    fn table_records_exist(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}

impl Storage for MemoryStorage {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.catalog.clone())
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        self.catalog = catalog.clone();
        Ok(())
    }

    fn save_table(&mut self, name: &str, store: &TableStore) -> Result<()> {
        self.tables.insert(name.to_string(), store.clone());
        Ok(())
    }

    fn delete_table(&mut self, name: &str) -> Result<()> {
        self.tables.remove(name);
        Ok(())
    }
}
