//! Column types for PlainDB
//!
//! Exactly three column types exist. Their textual names (`int`, `str`, `bool`)
//! are used both in `create_table` commands and in the persisted catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Column type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Signed whole number
    #[serde(rename = "int")]
    Integer,
    /// Text
    #[serde(rename = "str")]
    String,
    /// true / false
    #[serde(rename = "bool")]
    Boolean,
}

impl ColumnType {
    /// Name used in commands and on disk
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int",
            ColumnType::String => "str",
            ColumnType::Boolean => "bool",
        }
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ColumnType::Integer),
            "str" => Ok(ColumnType::String),
            "bool" => Ok(ColumnType::Boolean),
            other => Err(Error::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
