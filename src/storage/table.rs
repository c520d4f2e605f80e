//! Table storage for PlainDB
//!
//! A [`TableStore`] is the ordered record set of one table. Order is insertion
//! order and survives selects, updates and deletes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::predicate::{filter_by_conjunction, Predicate, SetClause};
use super::record::Record;
use super::value::Value;
use crate::catalog::{Schema, ID_COLUMN};
use crate::error::{Error, Result};

/// Records of one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableStore {
    records: Vec<Record>,
}

impl TableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already materialized records
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The ID the next insert receives: one past the largest live ID, or 1.
    ///
    /// Deleting the current maximum lets its ID come back; IDs below the live
    /// maximum are never handed out again.
    pub fn next_id(&self) -> Result<i64> {
        match self.records.iter().filter_map(Record::id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| Error::Internal(format!("no ID left after {}", max))),
        }
    }

    /// Check records loaded from storage against `schema`.
    ///
    /// Every record must conform to the schema, and IDs must be strictly positive
    /// and unique.
    pub fn validate(&self, table_name: &str, schema: &Schema) -> Result<()> {
        let corrupt = |reason: String| Error::CorruptTable {
            table: table_name.to_string(),
            reason,
        };

        let mut seen = HashSet::with_capacity(self.records.len());
        for (position, record) in self.records.iter().enumerate() {
            if !record.conforms_to(schema) {
                return Err(corrupt(format!(
                    "record {} does not match columns {}",
                    position + 1,
                    schema.describe()
                )));
            }
            match record.id() {
                Some(id) if id > 0 => {
                    if !seen.insert(id) {
                        return Err(corrupt(format!("ID {} appears more than once", id)));
                    }
                }
                Some(id) => return Err(corrupt(format!("ID {} is not positive", id))),
                None => return Err(corrupt(format!("record {} has no ID", position + 1))),
            }
        }
        Ok(())
    }

    /// Insert positional values for every non-`ID` column of `schema`.
    ///
    /// Values are checked in column order and the first mismatch is reported; the
    /// store is untouched on any error. Returns the assigned ID.
    pub fn insert(&mut self, schema: &Schema, values: Vec<Value>) -> Result<i64> {
        let columns: Vec<_> = schema.data_columns().collect();
        if values.len() != columns.len() {
            return Err(Error::ArityMismatch {
                expected: columns.len(),
                found: values.len(),
            });
        }

        for ((name, column_type), value) in columns.iter().zip(&values) {
            if !value.matches_type(*column_type) {
                return Err(Error::TypeMismatch {
                    column: name.to_string(),
                    expected: column_type.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let id = self.next_id()?;
        let mut record = Record::new();
        record.set(ID_COLUMN, Value::Integer(id));
        for ((name, _), value) in columns.into_iter().zip(values) {
            record.set(name, value);
        }
        self.records.push(record);

        debug!(id, "record inserted");
        Ok(id)
    }

    /// All records when `predicate` is `None`, otherwise the matching ones
    pub fn select(&self, predicate: Option<&Predicate>) -> Vec<Record> {
        match predicate {
            None => self.records.clone(),
            Some(predicate) => filter_by_conjunction(&self.records, predicate)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Overwrite the `set` columns of every record matching `predicate`.
    ///
    /// No schema validation happens here; callers check the set clause first.
    /// Returns the affected IDs in store order.
    pub fn update(&mut self, set: &SetClause, predicate: &Predicate) -> Vec<i64> {
        let mut updated = Vec::new();
        for record in self.records.iter_mut().filter(|r| predicate.matches(r)) {
            set.apply(record);
            updated.extend(record.id());
        }
        updated
    }

    /// Remove every record matching `predicate`, returning their IDs in store order
    pub fn delete(&mut self, predicate: &Predicate) -> Vec<i64> {
        let (removed, kept): (Vec<Record>, Vec<Record>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|record| predicate.matches(record));
        self.records = kept;
        removed.iter().filter_map(Record::id).collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
