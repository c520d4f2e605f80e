//! JSON file storage for PlainDB
//!
//! Layout:
//! - the catalog document at `meta_path`, `{"users": {"columns": {"ID": "int", ...}}}`
//! - one record document per table at `<data_dir>/<table>.json`, a JSON array of
//!   flat objects
//!
//! A missing document reads as empty.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::table::TableStore;
use super::{Storage, TableLoader};
use crate::catalog::Catalog;
use crate::error::Result;

/// Catalog and table documents as JSON files
#[derive(Debug, Clone)]
pub struct JsonStorage {
    /// Path of the catalog document
    meta_path: PathBuf,
    /// Directory where table documents are stored
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(meta_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            meta_path: meta_path.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Storage rooted at `dir`: `dir/db_meta.json` and `dir/data/`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("db_meta.json"), dir.join("data"))
    }

    pub fn meta_path(&self) -> &Path {
        &self.meta_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a table's record document
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }
}

/// Read a JSON document, `None` if the file does not exist
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

impl TableLoader for JsonStorage {
    fn load_table_records(&self, name: &str) -> Result<TableStore> {
        let path = self.table_path(name);
        let store: TableStore = read_document(&path)?.unwrap_or_default();
        debug!(table = name, path = %path.display(), "table records loaded");
        Ok(store)
    }

    fn table_records_exist(&self, name: &str) -> bool {
        self.table_path(name).is_file()
    }
}

impl Storage for JsonStorage {
    fn load_catalog(&self) -> Result<Catalog> {
        let catalog: Catalog = read_document(&self.meta_path)?.unwrap_or_default();
        Ok(catalog)
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        write_document(&self.meta_path, catalog)?;
        debug!(path = %self.meta_path.display(), tables = catalog.len(), "catalog saved");
        Ok(())
    }

    fn save_table(&mut self, name: &str, store: &TableStore) -> Result<()> {
        let path = self.table_path(name);
        write_document(&path, store)?;
        debug!(table = name, records = store.len(), "table records saved");
        Ok(())
    }

    fn delete_table(&mut self, name: &str) -> Result<()> {
        match fs::remove_file(self.table_path(name)) {
            Ok(()) => {
                debug!(table = name, "table records deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
