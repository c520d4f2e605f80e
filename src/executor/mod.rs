//! Command execution module
//!
//! This module turns parsed commands into results plus the state changes the
//! caller has to persist.

pub mod executor;

pub use executor::{handle_command, CommandOutcome, ExecutionEngine, QueryResult};
