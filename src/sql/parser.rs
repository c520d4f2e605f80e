//! Command parser
//!
//! Turns one line of input into a [`Command`]. Table-identifier commands are
//! split shell-style by the [`Lexer`](super::lexer::Lexer). The data commands
//! locate their keywords case-insensitively in the raw line, so values keep
//! their original spelling.

use super::ast::Command;
use super::lexer::split_words;
use crate::error::{Error, Result};
use crate::storage::{Condition, Predicate, SetClause, Value};

const INTO: &str = "into ";
const VALUES: &str = "values";
const FROM: &str = "from ";
const WHERE: &str = " where ";
const SET: &str = " set ";

/// Command parser
pub struct Parser<'a> {
    /// The trimmed input line
    input: &'a str,
    /// ASCII-lowercased copy of `input`, byte-aligned with it
    lower: String,
}

impl<'a> Parser<'a> {
    /// Create a new parser for one input line
    pub fn new(line: &'a str) -> Self {
        let input = line.trim();
        Self {
            input,
            lower: input.to_ascii_lowercase(),
        }
    }

    /// Parse the line
    pub fn parse(&self) -> Result<Command> {
        let verb = self
            .input
            .split_whitespace()
            .next()
            .ok_or_else(|| Error::syntax("empty command"))?
            .to_ascii_lowercase();

        match verb.as_str() {
            "create_table" => self.parse_create_table(),
            "drop_table" => self
                .parse_table_identifier()
                .map(|table_name| Command::DropTable { table_name }),
            "info" => self
                .parse_table_identifier()
                .map(|table_name| Command::Info { table_name }),
            "list_tables" => self.parse_bare(Command::ListTables),
            "insert" => self.parse_insert(),
            "select" => self.parse_select(),
            "update" => self.parse_update(),
            "delete" => self.parse_delete(),
            "help" => self.parse_bare(Command::Help),
            "exit" => self.parse_bare(Command::Exit),
            _ => Err(Error::UnknownCommand(verb)),
        }
    }

    // ========== Table identifier commands ==========

    fn parse_create_table(&self) -> Result<Command> {
        let mut words = split_words(self.input)?;
        if words.len() < 3 {
            return Err(Error::syntax(
                "insufficient arguments (usage: create_table <name> <column:type> ...)",
            ));
        }
        let columns = words.split_off(2);
        let table_name = words.swap_remove(1);
        Ok(Command::CreateTable {
            table_name,
            columns,
        })
    }

    /// `<verb> <name>`
    fn parse_table_identifier(&self) -> Result<String> {
        let mut words = split_words(self.input)?;
        match words.len() {
            2 => Ok(words.swap_remove(1)),
            1 => Err(Error::syntax("table name is missing")),
            _ => Err(Error::syntax("expected exactly one table name")),
        }
    }

    fn parse_bare(&self, command: Command) -> Result<Command> {
        if self.input.split_whitespace().count() > 1 {
            return Err(Error::syntax(format!(
                "{} takes no arguments",
                command.verb()
            )));
        }
        Ok(command)
    }

    // ========== Data commands ==========

    /// `insert into <table> values (<v1>, <v2>, ...)`
    fn parse_insert(&self) -> Result<Command> {
        let (into_pos, values_pos) = match (self.find(INTO), self.find(VALUES)) {
            (Some(i), Some(v)) => (i, v),
            _ => {
                return Err(Error::syntax(
                    "usage: insert into <table> values (<value>, ...)",
                ))
            }
        };

        let table_name = self.table_between(into_pos + INTO.len(), values_pos)?;
        let values = parse_value_list(&self.input[values_pos + VALUES.len()..])?;

        Ok(Command::Insert { table_name, values })
    }

    /// `select from <table> [where <col> = <value>]`
    fn parse_select(&self) -> Result<Command> {
        let from_pos = self
            .find(FROM)
            .ok_or_else(|| Error::syntax("usage: select from <table> [where <column> = <value>]"))?;
        let table_start = from_pos + FROM.len();

        let (table_name, predicate) = match self.find(WHERE) {
            Some(where_pos) => (
                self.table_between(table_start, where_pos)?,
                Some(Predicate::from(parse_condition(
                    &self.input[where_pos + WHERE.len()..],
                )?)),
            ),
            None => (self.table_between(table_start, self.input.len())?, None),
        };

        Ok(Command::Select {
            table_name,
            predicate,
        })
    }

    /// `update <table> set <col> = <value> where <col> = <value>`
    fn parse_update(&self) -> Result<Command> {
        let usage = || Error::syntax("usage: update <table> set <column> = <value> where <column> = <value>");
        let (set_pos, where_pos) = match (self.find(SET), self.find(WHERE)) {
            (Some(s), Some(w)) if s < w => (s, w),
            _ => return Err(usage()),
        };
        let verb_end = self.input.find(char::is_whitespace).ok_or_else(usage)?;

        let table_name = self.table_between(verb_end, set_pos)?;
        let set = parse_condition(self.slice(set_pos + SET.len(), where_pos)?)?;
        let predicate = parse_condition(&self.input[where_pos + WHERE.len()..])?;

        Ok(Command::Update {
            table_name,
            set: SetClause::from(set),
            predicate: Predicate::from(predicate),
        })
    }

    /// `delete from <table> where <col> = <value>`
    fn parse_delete(&self) -> Result<Command> {
        let (from_pos, where_pos) = match (self.find(FROM), self.find(WHERE)) {
            (Some(f), Some(w)) => (f, w),
            _ => {
                return Err(Error::syntax(
                    "usage: delete from <table> where <column> = <value>",
                ))
            }
        };

        let table_name = self.table_between(from_pos + FROM.len(), where_pos)?;
        let predicate = parse_condition(&self.input[where_pos + WHERE.len()..])?;

        Ok(Command::Delete {
            table_name,
            predicate: Predicate::from(predicate),
        })
    }

    // ========== Helpers ==========

    /// Byte offset of the first case-insensitive occurrence of `keyword`
    fn find(&self, keyword: &str) -> Option<usize> {
        self.lower.find(keyword)
    }

    fn slice(&self, start: usize, end: usize) -> Result<&'a str> {
        self.input
            .get(start..end)
            .ok_or_else(|| Error::syntax("keywords are out of order"))
    }

    /// Trimmed, non-empty table name in `input[start..end]`
    fn table_between(&self, start: usize, end: usize) -> Result<String> {
        let name = self.slice(start, end)?.trim();
        if name.is_empty() {
            return Err(Error::syntax("table name is missing"));
        }
        Ok(name.to_string())
    }
}

/// Parse a single `column = value` condition.
///
/// Splits once on the first `=`; the column must be non-empty and the value
/// non-blank.
pub fn parse_condition(text: &str) -> Result<Condition> {
    let (column, value) = text
        .split_once('=')
        .ok_or_else(|| Error::syntax(format!("expected <column> = <value>, got \"{}\"", text.trim())))?;

    let column = column.trim();
    if column.is_empty() {
        return Err(Error::syntax("condition is missing a column name"));
    }
    let value = Value::parse_literal(value)
        .ok_or_else(|| Error::syntax(format!("condition on \"{}\" is missing a value", column)))?;

    Ok(Condition::new(column, value))
}

/// Parse `(<v1>, <v2>, ...)`
fn parse_value_list(text: &str) -> Result<Vec<Value>> {
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::syntax("values must be wrapped in parentheses"))?;

    if inner.contains(['(', ')']) {
        return Err(Error::syntax("nested parentheses are not supported"));
    }
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .enumerate()
        .map(|(i, raw)| {
            Value::parse_literal(raw)
                .ok_or_else(|| Error::syntax(format!("value {} is empty", i + 1)))
        })
        .collect()
}

/// Parse one line of input
pub fn parse_command(line: &str) -> Result<Command> {
    Parser::new(line).parse()
}
