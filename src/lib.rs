//! PlainDB - A minimal single-user table store written in Rust
//!
//! This library provides the components of a small command-driven database:
//! - Command language (lexer, parser, commands)
//! - Schema catalog
//! - Record storage (values, predicates, table stores, JSON persistence)
//! - Command execution
//! - Sessions with select caching, confirmation and timing hooks

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod session;
pub mod sql;
pub mod storage;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use session::Session;
