//! System Catalog for PlainDB
//!
//! Maps table names to their schemas, in creation order. The catalog is a plain
//! value: the session loads it before each command and persists it whenever a
//! command reports it as changed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::schema::{Schema, ID_COLUMN};
use super::types::ColumnType;
use crate::error::{Error, Result};

/// System Catalog - table name → schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    tables: IndexMap<String, Schema>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table from `name:type` column definitions.
    ///
    /// `ID:int` is always the first column; a caller-supplied `ID` definition is
    /// skipped once its type has been validated. Nothing is changed unless every
    /// definition is valid.
    pub fn create_table<S: AsRef<str>>(&mut self, name: &str, column_defs: &[S]) -> Result<&Schema> {
        if self.tables.contains_key(name) {
            return Err(Error::TableAlreadyExists(name.to_string()));
        }
        validate_table_name(name)?;

        let mut schema = Schema::new();
        for def in column_defs {
            let (column, column_type) = parse_column_def(def.as_ref())?;
            if column == ID_COLUMN {
                continue;
            }
            schema.add_column(column, column_type)?;
        }

        info!(table = name, columns = %schema.describe(), "table created");
        Ok(&*self.tables.entry(name.to_string()).or_insert(schema))
    }

    /// Get a table schema by name
    pub fn get_table(&self, name: &str) -> Result<&Schema> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Drop a table, returning its schema
    pub fn drop_table(&mut self, name: &str) -> Result<Schema> {
        let schema = self
            .tables
            .shift_remove(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        info!(table = name, "table dropped");
        Ok(schema)
    }

    /// List all table names in creation order
    pub fn list_tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Split a `name:type` token
fn parse_column_def(def: &str) -> Result<(String, ColumnType)> {
    let mut parts = def.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(ty), None) if !name.is_empty() && !ty.is_empty() => {
            Ok((name.to_string(), ty.parse()?))
        }
        _ => Err(Error::syntax(format!(
            "invalid column definition \"{}\" (expected name:type)",
            def
        ))),
    }
}

/// Table names double as file names for the per-table record documents
fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return Err(Error::syntax(format!("invalid table name \"{}\"", name)));
    }
    Ok(())
}
