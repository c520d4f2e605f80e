//! Command executor for PlainDB
//!
//! Executes parsed commands against a catalog snapshot and lazily loaded table
//! stores. The engine is stateless and never writes anything itself: every change
//! comes back in a [`CommandOutcome`] for the caller to persist.

use tracing::debug;

use crate::catalog::{Catalog, Schema, ID_COLUMN};
use crate::error::{Error, Result};
use crate::sql::{parse_command, Command};
use crate::storage::{Predicate, Record, SetClause, TableLoader, TableStore, Value};

/// Query result payload
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Table created with the given schema
    TableCreated { table_name: String, schema: Schema },
    /// Table dropped
    TableDropped { table_name: String },
    /// Table names in catalog order
    Tables(Vec<String>),
    /// Schema and record count of one table
    TableInfo {
        table_name: String,
        schema: Schema,
        record_count: usize,
    },
    /// Record inserted with the given ID
    Inserted { table_name: String, id: i64 },
    /// Selected records, displayed in schema column order
    Rows {
        table_name: String,
        schema: Schema,
        records: Vec<Record>,
    },
    /// IDs of updated records, empty when nothing matched
    Updated { table_name: String, ids: Vec<i64> },
    /// IDs of deleted records, empty when nothing matched
    Deleted { table_name: String, ids: Vec<i64> },
    /// Command reference requested
    Help,
    /// Session end requested
    Exit,
}

/// Everything a command produced: the result and the state to persist
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// New catalog, if the command changed it
    pub catalog: Option<Catalog>,
    /// Table whose store changed, with its new contents
    pub table: Option<(String, TableStore)>,
    /// Table whose persisted records must be discarded
    pub dropped_table: Option<String>,
    /// Result payload
    pub result: QueryResult,
}

impl CommandOutcome {
    /// Outcome that changes nothing
    pub fn read_only(result: QueryResult) -> Self {
        Self {
            catalog: None,
            table: None,
            dropped_table: None,
            result,
        }
    }

    fn with_catalog(catalog: Catalog, result: QueryResult) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::read_only(result)
        }
    }

    fn with_table(table_name: &str, store: TableStore, result: QueryResult) -> Self {
        Self {
            table: Some((table_name.to_string(), store)),
            ..Self::read_only(result)
        }
    }

    /// Whether anything must be persisted
    pub fn is_mutation(&self) -> bool {
        self.catalog.is_some() || self.table.is_some() || self.dropped_table.is_some()
    }
}

/// Execution Engine
pub struct ExecutionEngine<'a> {
    /// Catalog snapshot for this command
    catalog: &'a Catalog,
    /// Source of table records
    loader: &'a dyn TableLoader,
}

impl<'a> ExecutionEngine<'a> {
    /// Create a new execution engine
    pub fn new(catalog: &'a Catalog, loader: &'a dyn TableLoader) -> Self {
        Self { catalog, loader }
    }

    /// Execute a parsed command
    pub fn execute(&self, command: Command) -> Result<CommandOutcome> {
        debug!(
            command = command.verb(),
            table = command.table_name().unwrap_or_default(),
            "executing command"
        );

        match command {
            Command::CreateTable {
                table_name,
                columns,
            } => self.execute_create_table(&table_name, &columns),
            Command::DropTable { table_name } => self.execute_drop_table(&table_name),
            Command::ListTables => Ok(CommandOutcome::read_only(QueryResult::Tables(
                self.catalog.list_tables(),
            ))),
            Command::Info { table_name } => self.execute_info(&table_name),
            Command::Insert { table_name, values } => self.execute_insert(&table_name, values),
            Command::Select {
                table_name,
                predicate,
            } => self.execute_select(&table_name, predicate.as_ref()),
            Command::Update {
                table_name,
                set,
                predicate,
            } => self.execute_update(&table_name, &set, &predicate),
            Command::Delete {
                table_name,
                predicate,
            } => self.execute_delete(&table_name, &predicate),
            Command::Help => Ok(CommandOutcome::read_only(QueryResult::Help)),
            Command::Exit => Ok(CommandOutcome::read_only(QueryResult::Exit)),
        }
    }

    fn execute_create_table(&self, table_name: &str, columns: &[String]) -> Result<CommandOutcome> {
        let mut catalog = self.catalog.clone();
        let schema = catalog.create_table(table_name, columns)?.clone();

        Ok(CommandOutcome::with_catalog(
            catalog,
            QueryResult::TableCreated {
                table_name: table_name.to_string(),
                schema,
            },
        ))
    }

    fn execute_drop_table(&self, table_name: &str) -> Result<CommandOutcome> {
        let mut catalog = self.catalog.clone();
        catalog.drop_table(table_name)?;

        let mut outcome = CommandOutcome::with_catalog(
            catalog,
            QueryResult::TableDropped {
                table_name: table_name.to_string(),
            },
        );
        outcome.dropped_table = Some(table_name.to_string());
        Ok(outcome)
    }

    fn execute_info(&self, table_name: &str) -> Result<CommandOutcome> {
        let schema = self.catalog.get_table(table_name)?;
        let record_count = if self.loader.table_records_exist(table_name) {
            self.load_store(table_name, schema)?.len()
        } else {
            0
        };

        Ok(CommandOutcome::read_only(QueryResult::TableInfo {
            table_name: table_name.to_string(),
            schema: schema.clone(),
            record_count,
        }))
    }

    fn execute_insert(&self, table_name: &str, values: Vec<Value>) -> Result<CommandOutcome> {
        let schema = self.catalog.get_table(table_name)?;
        let mut store = self.load_store(table_name, schema)?;
        let id = store.insert(schema, values)?;

        Ok(CommandOutcome::with_table(
            table_name,
            store,
            QueryResult::Inserted {
                table_name: table_name.to_string(),
                id,
            },
        ))
    }

    fn execute_select(
        &self,
        table_name: &str,
        predicate: Option<&Predicate>,
    ) -> Result<CommandOutcome> {
        let schema = self.catalog.get_table(table_name)?;
        let records = self.load_store(table_name, schema)?.select(predicate);

        Ok(CommandOutcome::read_only(QueryResult::Rows {
            table_name: table_name.to_string(),
            schema: schema.clone(),
            records,
        }))
    }

    fn execute_update(
        &self,
        table_name: &str,
        set: &SetClause,
        predicate: &Predicate,
    ) -> Result<CommandOutcome> {
        let schema = self.catalog.get_table(table_name)?;
        check_set_clause(table_name, schema, set)?;

        let mut store = self.load_store(table_name, schema)?;
        let ids = store.update(set, predicate);
        let nothing_updated = ids.is_empty();
        let result = QueryResult::Updated {
            table_name: table_name.to_string(),
            ids,
        };

        if nothing_updated {
            return Ok(CommandOutcome::read_only(result));
        }
        Ok(CommandOutcome::with_table(table_name, store, result))
    }

    fn execute_delete(&self, table_name: &str, predicate: &Predicate) -> Result<CommandOutcome> {
        let schema = self.catalog.get_table(table_name)?;

        let mut store = self.load_store(table_name, schema)?;
        let ids = store.delete(predicate);
        let nothing_deleted = ids.is_empty();
        let result = QueryResult::Deleted {
            table_name: table_name.to_string(),
            ids,
        };

        if nothing_deleted {
            return Ok(CommandOutcome::read_only(result));
        }
        Ok(CommandOutcome::with_table(table_name, store, result))
    }

    /// Load a table's records, refusing stores that break the schema
    fn load_store(&self, table_name: &str, schema: &Schema) -> Result<TableStore> {
        let store = self.loader.load_table_records(table_name)?;
        store.validate(table_name, schema)?;
        Ok(store)
    }
}

/// Reject assignments that would break the schema: unknown columns, `ID`, and
/// values of the wrong type
fn check_set_clause(table_name: &str, schema: &Schema, set: &SetClause) -> Result<()> {
    for assignment in set.assignments() {
        if assignment.column == ID_COLUMN {
            return Err(Error::ReadOnlyColumn(assignment.column.clone()));
        }
        let column_type = schema
            .column_type(&assignment.column)
            .ok_or_else(|| Error::ColumnNotFound(assignment.column.clone(), table_name.to_string()))?;
        if !assignment.value.matches_type(column_type) {
            return Err(Error::TypeMismatch {
                column: assignment.column.clone(),
                expected: column_type.to_string(),
                value: assignment.value.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse and execute one line against a catalog snapshot
pub fn handle_command(
    catalog: &Catalog,
    loader: &dyn TableLoader,
    line: &str,
) -> Result<CommandOutcome> {
    let command = parse_command(line)?;
    ExecutionEngine::new(catalog, loader).execute(command)
}
