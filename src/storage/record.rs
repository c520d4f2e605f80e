//! Records for PlainDB
//!
//! A record is one row: an ordered column → value mapping. On disk it is a flat
//! JSON object, e.g. `{"ID": 1, "name": "Alice", "age": 30}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::catalog::{Schema, ID_COLUMN};

/// A record (row) in a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Set a column, appending it if absent
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// The record's `ID`, if present and an integer
    pub fn id(&self) -> Option<i64> {
        self.get(ID_COLUMN).and_then(Value::as_i64)
    }

    /// Column names in record order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Values laid out in the schema's column order; missing columns are `None`
    pub fn project(&self, schema: &Schema) -> Vec<Option<&Value>> {
        schema.columns().map(|(name, _)| self.get(name)).collect()
    }

    /// Whether the key set equals the schema's and every value matches its type
    pub fn conforms_to(&self, schema: &Schema) -> bool {
        self.values.len() == schema.column_count()
            && self.values.iter().all(|(name, value)| {
                schema
                    .column_type(name)
                    .is_some_and(|ty| value.matches_type(ty))
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
