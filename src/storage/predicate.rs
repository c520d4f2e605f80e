//! Where and set clauses
//!
//! Both are ordered column → value mappings with unique columns. A [`Predicate`]
//! is a conjunction of equality tests; a [`SetClause`] lists the columns an
//! update overwrites.

use std::fmt;

use super::record::Record;
use super::value::Value;

/// A single `column = value` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    pub column: String,
    pub value: Value,
}

impl Condition {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{} = \"{}\"", self.column, s),
            other => write!(f, "{} = {}", self.column, other),
        }
    }
}

/// Insert or replace `condition` keeping columns unique
fn upsert(conditions: &mut Vec<Condition>, condition: Condition) {
    match conditions.iter_mut().find(|c| c.column == condition.column) {
        Some(existing) => existing.value = condition.value,
        None => conditions.push(condition),
    }
}

/// Conjunction of equality tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// `column = value`
    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::from(Condition::new(column, value))
    }

    /// Add another equality test; a repeated column replaces the earlier test
    pub fn and(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        upsert(&mut self.conditions, Condition::new(column, value));
        self
    }

    /// A record matches when it holds every column with an equal value.
    /// Equality includes the type tag, and missing columns never match.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|c| record.get(&c.column) == Some(&c.value))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl From<Condition> for Predicate {
    fn from(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(" and "))
    }
}

/// Columns to overwrite on update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetClause {
    assignments: Vec<Condition>,
}

impl SetClause {
    pub fn assign(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        upsert(&mut self.assignments, Condition::new(column, value));
        self
    }

    pub fn assignments(&self) -> &[Condition] {
        &self.assignments
    }

    /// Overwrite the assigned columns of `record`
    pub fn apply(&self, record: &mut Record) {
        for assignment in &self.assignments {
            record.set(assignment.column.clone(), assignment.value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl From<Condition> for SetClause {
    fn from(condition: Condition) -> Self {
        Self {
            assignments: vec![condition],
        }
    }
}

/// Records matching `predicate`, in their original order
pub fn filter_by_conjunction<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    predicate: &Predicate,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}
