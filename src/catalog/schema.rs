//! Schema definitions for PlainDB
//!
//! A schema is an ordered column-name → type mapping whose first entry is always
//! `ID:int`. Column order defines the positional order of `insert` values and the
//! display order of selected records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::error::{Error, Result};

/// Name of the identifier column present in every table
pub const ID_COLUMN: &str = "ID";

/// Table schema - defines the structure of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDocument", into = "SchemaDocument")]
pub struct Schema {
    /// Ordered column name → type mapping, `ID` first
    columns: IndexMap<String, ColumnType>,
}

impl Schema {
    /// Create a schema holding only the `ID` column
    pub fn new() -> Self {
        let mut columns = IndexMap::new();
        columns.insert(ID_COLUMN.to_string(), ColumnType::Integer);
        Self { columns }
    }

    /// Append a data column.
    ///
    /// Fails with [`Error::DuplicateColumn`] if the name is already taken, which
    /// includes `ID`.
    pub fn add_column(&mut self, name: impl Into<String>, column_type: ColumnType) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        self.columns.insert(name, column_type);
        Ok(())
    }

    /// Type of a column, if present
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.get(name).copied()
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// All columns in order, `ID` first
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Columns supplied by `insert`, i.e. everything except `ID`
    pub fn data_columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns().filter(|(name, _)| *name != ID_COLUMN)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Get number of columns, `ID` included
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `ID:int, name:str, ...`
    pub fn describe(&self) -> String {
        self.columns()
            .map(|(name, ty)| format!("{}:{}", name, ty))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk shape of a schema: `{"columns": {"ID": "int", ...}}`
#[derive(Serialize, Deserialize)]
struct SchemaDocument {
    columns: IndexMap<String, ColumnType>,
}

impl TryFrom<SchemaDocument> for Schema {
    type Error = Error;

    fn try_from(doc: SchemaDocument) -> Result<Self> {
        match doc.columns.first() {
            Some((name, ColumnType::Integer)) if name == ID_COLUMN => Ok(Self {
                columns: doc.columns,
            }),
            _ => Err(Error::Internal(format!(
                "schema must start with {}:int",
                ID_COLUMN
            ))),
        }
    }
}

impl From<Schema> for SchemaDocument {
    fn from(schema: Schema) -> Self {
        Self {
            columns: schema.columns,
        }
    }
}
