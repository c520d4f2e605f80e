//! Catalog module
//!
//! This module contains the system catalog, schema definitions, and column types.

pub mod catalog;
pub mod schema;
pub mod types;

pub use catalog::Catalog;
pub use schema::{Schema, ID_COLUMN};
pub use types::ColumnType;
