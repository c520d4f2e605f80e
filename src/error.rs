//! Error types for PlainDB
//!
//! Every fallible operation in the crate returns [`Error`]. Each variant maps to one
//! [`ErrorKind`], the coarse category a caller reports to the user.

use thiserror::Error;

/// The main error type for PlainDB
#[derive(Error, Debug)]
pub enum Error {
    // ========== Lookup Errors ==========
    #[error("Table \"{0}\" does not exist")]
    TableNotFound(String),

    #[error("Column \"{0}\" does not exist in table \"{1}\"")]
    ColumnNotFound(String, String),

    // ========== Naming Errors ==========
    #[error("Table \"{0}\" already exists")]
    TableAlreadyExists(String),

    #[error("Column \"{0}\" is defined more than once")]
    DuplicateColumn(String),

    // ========== Type Errors ==========
    #[error("Invalid type: {0} (expected int, str or bool)")]
    UnknownType(String),

    #[error("Invalid value {value} for column \"{column}\" (expected {expected})")]
    TypeMismatch {
        column: String,
        expected: String,
        value: String,
    },

    // ========== Syntax Errors ==========
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error("Unknown command: {0}. Type 'help' for available commands")]
    UnknownCommand(String),

    #[error("Column \"{0}\" cannot be updated")]
    ReadOnlyColumn(String),

    // ========== Arity Errors ==========
    #[error("Expected {expected} values, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    // ========== Storage Errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Records of table \"{table}\" are corrupt: {reason}")]
    CorruptTable { table: String, reason: String },

    // ========== Internal Errors ==========
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error category reported at the command boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateName,
    InvalidType,
    InvalidSyntax,
    ArityMismatch,
    Storage,
    Internal,
}

impl Error {
    /// Build a syntax error from any message
    pub fn syntax(message: impl Into<String>) -> Self {
        Error::InvalidSyntax(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TableNotFound(_) | Error::ColumnNotFound(_, _) => ErrorKind::NotFound,
            Error::TableAlreadyExists(_) | Error::DuplicateColumn(_) => ErrorKind::DuplicateName,
            Error::UnknownType(_) | Error::TypeMismatch { .. } => ErrorKind::InvalidType,
            Error::InvalidSyntax(_) | Error::UnknownCommand(_) | Error::ReadOnlyColumn(_) => {
                ErrorKind::InvalidSyntax
            }
            Error::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Error::Io(_) | Error::Serialization(_) | Error::CorruptTable { .. } => {
                ErrorKind::Storage
            }
            Error::Config(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias for PlainDB operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TableNotFound("users".to_string());
        assert_eq!(err.to_string(), "Table \"users\" does not exist");

        let err = Error::ArityMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "Expected 2 values, got 1");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::TableAlreadyExists("t".into()).kind(),
            ErrorKind::DuplicateName
        );
        assert_eq!(
            Error::ColumnNotFound("c".into(), "t".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(Error::UnknownType("float".into()).kind(), ErrorKind::InvalidType);
        assert_eq!(Error::syntax("bad").kind(), ErrorKind::InvalidSyntax);
        assert_eq!(
            Error::UnknownCommand("frobnicate".into()).kind(),
            ErrorKind::InvalidSyntax
        );
    }
}
