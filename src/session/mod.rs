//! Session module
//!
//! A [`Session`] owns the storage collaborator and drives one command at a time:
//! reload the catalog, execute, persist whatever the outcome changed. It also
//! owns the select cache, so the executor itself stays stateless.

pub mod cache;
pub mod hooks;
pub mod render;

pub use cache::{CacheKey, SelectCache};
pub use hooks::{confirm_action, timed};
pub use render::render;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::executor::{CommandOutcome, ExecutionEngine, QueryResult};
use crate::sql::{parse_command, Command};
use crate::storage::Storage;

/// A database session over a storage collaborator
pub struct Session<S: Storage> {
    storage: S,
    config: Config,
    cache: SelectCache,
}

impl<S: Storage> Session<S> {
    /// Create a new session
    pub fn new(storage: S, config: Config) -> Self {
        Self {
            storage,
            config,
            cache: SelectCache::new(),
        }
    }

    /// Parse one input line
    pub fn parse(&self, line: &str) -> Result<Command> {
        parse_command(line)
    }

    /// Parse and execute one input line
    pub fn execute_line(&mut self, line: &str) -> Result<QueryResult> {
        let command = self.parse(line)?;
        self.execute(command)
    }

    /// Execute a command and persist its changes before returning
    pub fn execute(&mut self, command: Command) -> Result<QueryResult> {
        match command {
            Command::Help => return Ok(QueryResult::Help),
            Command::Exit => return Ok(QueryResult::Exit),
            _ => {}
        }

        let catalog = self.storage.load_catalog()?;

        if let Command::Select {
            table_name,
            predicate,
        } = &command
        {
            if self.config.cache_selects {
                let schema = catalog.get_table(table_name)?;
                let key = CacheKey::new(table_name.as_str(), predicate.clone());
                if let Some(records) = self.cache.get(&key) {
                    return Ok(QueryResult::Rows {
                        table_name: table_name.clone(),
                        schema: schema.clone(),
                        records: records.to_vec(),
                    });
                }

                let outcome = ExecutionEngine::new(&catalog, &self.storage).execute(command)?;
                if let QueryResult::Rows { records, .. } = &outcome.result {
                    self.cache.insert(key, records.clone());
                }
                return Ok(outcome.result);
            }
        }

        let outcome = ExecutionEngine::new(&catalog, &self.storage).execute(command)?;
        self.persist(&outcome)?;
        Ok(outcome.result)
    }

    fn persist(&mut self, outcome: &CommandOutcome) -> Result<()> {
        if let Some(catalog) = &outcome.catalog {
            self.storage.save_catalog(catalog)?;
        }
        if let Some(table_name) = &outcome.dropped_table {
            self.storage.delete_table(table_name)?;
            self.cache.invalidate(table_name);
        }
        if let Some((table_name, store)) = &outcome.table {
            self.storage.save_table(table_name, store)?;
            self.cache.invalidate(table_name);
            debug!(table = %table_name, records = store.len(), "table persisted");
        }
        if let QueryResult::TableCreated { table_name, .. } = &outcome.result {
            self.cache.invalidate(table_name);
        }
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cache(&self) -> &SelectCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonStorage, MemoryStorage, TableLoader};

    fn create_test_session(config: Config) -> Session<MemoryStorage> {
        let mut session = Session::new(MemoryStorage::new(), config);
        session
            .execute_line("create_table users name:str age:int")
            .unwrap();
        session
            .execute_line(r#"insert into users values ("Alice", 30)"#)
            .unwrap();
        session
    }

    fn row_count(result: QueryResult) -> usize {
        match result {
            QueryResult::Rows { records, .. } => records.len(),
            other => panic!("Expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut session = create_test_session(Config::new());
        session
            .execute_line(r#"insert into users values ("Bob", 25)"#)
            .unwrap();

        assert_eq!(session.storage().load_table_records("users").unwrap().len(), 2);
        assert!(session.storage().load_catalog().unwrap().table_exists("users"));
    }

    #[test]
    fn test_select_is_cached_until_mutation() {
        let mut session = create_test_session(Config::new());

        assert_eq!(row_count(session.execute_line("select from users").unwrap()), 1);
        assert_eq!(session.cache().len(), 1);
        assert_eq!(row_count(session.execute_line("select from users").unwrap()), 1);
        assert_eq!(session.cache().len(), 1);

        session
            .execute_line(r#"insert into users values ("Bob", 25)"#)
            .unwrap();
        assert!(session.cache().is_empty());
        assert_eq!(row_count(session.execute_line("select from users").unwrap()), 2);
    }

    #[test]
    fn test_cache_disabled() {
        let mut session = create_test_session(Config::new().cache_selects(false));
        session.execute_line("select from users").unwrap();
        assert!(session.cache().is_empty());
    }

    #[test]
    fn test_cached_select_on_dropped_table_fails() {
        let mut session = create_test_session(Config::new());
        session.execute_line("select from users").unwrap();
        session.execute_line("drop_table users").unwrap();

        assert!(session.execute_line("select from users").is_err());
        assert!(!session.storage().table_records_exist("users"));
    }

    #[test]
    fn test_failed_command_changes_nothing() {
        let mut session = create_test_session(Config::new());
        let before = session.storage().load_table_records("users").unwrap();

        assert!(session
            .execute_line(r#"insert into users values ("Dana")"#)
            .is_err());
        assert!(session.execute_line("frobnicate users").is_err());

        assert_eq!(session.storage().load_table_records("users").unwrap(), before);
    }

    #[test]
    fn test_help_and_exit_work_with_unreadable_catalog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("db_meta.json"), "{not json").unwrap();
        let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());

        assert_eq!(session.execute_line("help").unwrap(), QueryResult::Help);
        assert_eq!(session.execute_line("exit").unwrap(), QueryResult::Exit);
        assert!(session.execute_line("list_tables").is_err());
    }
}
