//! Value type for PlainDB
//!
//! This module defines how data values are represented in memory and how literals
//! typed in commands become values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ColumnType;

/// A value in the database.
///
/// The tag is always explicit: `Boolean(true)` never equals `Integer(1)` and never
/// satisfies an `int` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value (64-bit)
    Integer(i64),
    /// String value
    String(String),
    /// Boolean value
    Boolean(bool),
}

impl Value {
    /// Parse a command literal.
    ///
    /// Returns `None` for blank input. Otherwise, in order: `true`/`false` in any
    /// case, a quoted string (quotes stripped, no escapes), an integer, and finally
    /// the raw text as a string.
    pub fn parse_literal(text: &str) -> Option<Value> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if text.eq_ignore_ascii_case("true") {
            return Some(Value::Boolean(true));
        }
        if text.eq_ignore_ascii_case("false") {
            return Some(Value::Boolean(false));
        }

        if let Some(inner) = strip_quotes(text) {
            return Some(Value::String(inner.to_string()));
        }

        match text.parse::<i64>() {
            Ok(i) => Some(Value::Integer(i)),
            Err(_) => Some(Value::String(text.to_string())),
        }
    }

    /// Type tag of this value
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Integer(_) => ColumnType::Integer,
            Value::String(_) => ColumnType::String,
            Value::Boolean(_) => ColumnType::Boolean,
        }
    }

    /// Whether this value may be stored in a column of the given type
    pub fn matches_type(&self, column_type: ColumnType) -> bool {
        self.column_type() == column_type
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// Inner text of `"..."` or `'...'`
fn strip_quotes(text: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        text.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
