//! Command language module
//!
//! This module contains the command-line language components:
//! - Shell-style lexer for table-identifier commands
//! - Parser for the full command set
//! - Parsed command type

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::Command;
pub use lexer::Lexer;
pub use parser::{parse_command, parse_condition, Parser};
