//! Storage module
//!
//! This module contains the record-level components:
//! - Values and literal parsing
//! - Records, predicates and per-table stores
//! - Persistence collaborators (JSON files, in-memory)

pub mod disk;
pub mod memory;
pub mod predicate;
pub mod record;
pub mod table;
pub mod value;

pub use disk::JsonStorage;
pub use memory::MemoryStorage;
pub use predicate::{filter_by_conjunction, Condition, Predicate, SetClause};
pub use record::Record;
pub use table::TableStore;
pub use value::Value;

use crate::catalog::Catalog;
use crate::error::Result;

/// Read access to persisted table records.
///
/// A table with nothing persisted yet loads as an empty store; a missing file
/// is never an error.
pub trait TableLoader {
    fn load_table_records(&self, name: &str) -> Result<TableStore>;

    fn table_records_exist(&self, name: &str) -> bool;
}

/// Full persistence collaborator used by a session
pub trait Storage: TableLoader {
    fn load_catalog(&self) -> Result<Catalog>;

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()>;

    fn save_table(&mut self, name: &str, store: &TableStore) -> Result<()>;

    /// Discard a table's records; a no-op when none are persisted
    fn delete_table(&mut self, name: &str) -> Result<()>;
}
