//! Parsed commands
//!
//! One line of input parses to exactly one [`Command`].

use crate::storage::{Predicate, SetClause, Value};

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `create_table <name> <col:type> ...`
    CreateTable {
        table_name: String,
        /// Raw `name:type` tokens, validated by the catalog
        columns: Vec<String>,
    },
    /// `drop_table <name>`
    DropTable { table_name: String },
    /// `list_tables`
    ListTables,
    /// `info <name>`
    Info { table_name: String },
    /// `insert into <table> values (...)`
    Insert {
        table_name: String,
        values: Vec<Value>,
    },
    /// `select from <table> [where <col> = <value>]`
    Select {
        table_name: String,
        predicate: Option<Predicate>,
    },
    /// `update <table> set <col> = <value> where <col> = <value>`
    Update {
        table_name: String,
        set: SetClause,
        predicate: Predicate,
    },
    /// `delete from <table> where <col> = <value>`
    Delete {
        table_name: String,
        predicate: Predicate,
    },
    /// `help`
    Help,
    /// `exit`
    Exit,
}

impl Command {
    /// Command word as typed
    pub fn verb(&self) -> &'static str {
        match self {
            Command::CreateTable { .. } => "create_table",
            Command::DropTable { .. } => "drop_table",
            Command::ListTables => "list_tables",
            Command::Info { .. } => "info",
            Command::Insert { .. } => "insert",
            Command::Select { .. } => "select",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    /// Table the command operates on
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Command::CreateTable { table_name, .. }
            | Command::DropTable { table_name }
            | Command::Info { table_name }
            | Command::Insert { table_name, .. }
            | Command::Select { table_name, .. }
            | Command::Update { table_name, .. }
            | Command::Delete { table_name, .. } => Some(table_name),
            Command::ListTables | Command::Help | Command::Exit => None,
        }
    }

    /// Whether the command can destroy data
    pub fn is_destructive(&self) -> bool {
        matches!(self, Command::DropTable { .. } | Command::Delete { .. })
    }

    /// Short description used when asking for confirmation
    pub fn action_name(&self) -> String {
        match self {
            Command::DropTable { table_name } => format!("drop table {}", table_name),
            Command::Delete {
                table_name,
                predicate,
            } => format!("delete from {} where {}", table_name, predicate),
            other => other.verb().to_string(),
        }
    }
}
