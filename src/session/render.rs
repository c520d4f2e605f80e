//! Text rendering of query results

use crate::catalog::Schema;
use crate::executor::QueryResult;
use crate::storage::Record;

/// Command reference printed by `help`
pub const HELP_TEXT: &str = r#"
Data commands:
  create_table <table> <column:type> ...                   Create a table (types: int, str, bool)
  list_tables                                              List all tables
  drop_table <table>                                       Drop a table
  info <table>                                             Show a table's columns and record count
  insert into <table> values (<value1>, <value2>, ...)     Add a record
  select from <table> [where <column> = <value>]           Read records
  update <table> set <column> = <value> where <column> = <value>
                                                           Update matching records
  delete from <table> where <column> = <value>             Delete matching records

General commands:
  help                                                     Show this help message
  exit                                                     Exit PlainDB

Examples:
  create_table users name:str age:int active:bool
  insert into users values ("Alice", 30, true)
  select from users where name = "Alice"
"#;

/// Render a result for display
pub fn render(result: &QueryResult) -> String {
    match result {
        QueryResult::TableCreated { table_name, schema } => format!(
            "Table \"{}\" created with columns: {}",
            table_name,
            schema.describe()
        ),
        QueryResult::TableDropped { table_name } => {
            format!("Table \"{}\" dropped.", table_name)
        }
        QueryResult::Tables(names) => {
            if names.is_empty() {
                "No tables found.".to_string()
            } else {
                names
                    .iter()
                    .map(|name| format!("- {}", name))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        QueryResult::TableInfo {
            table_name,
            schema,
            record_count,
        } => format!(
            "Table: {}\nColumns: {}\nRecords: {}",
            table_name,
            schema.describe(),
            record_count
        ),
        QueryResult::Inserted { table_name, id } => {
            format!("Record with ID={} added to table \"{}\".", id, table_name)
        }
        QueryResult::Rows {
            schema, records, ..
        } => {
            if records.is_empty() {
                "No records found.".to_string()
            } else {
                format_records(schema, records)
            }
        }
        QueryResult::Updated { table_name, ids } => per_id_lines(
            ids,
            "No records found to update.",
            |id| format!("Record with ID={} in table \"{}\" updated.", id, table_name),
        ),
        QueryResult::Deleted { table_name, ids } => per_id_lines(
            ids,
            "No records found to delete.",
            |id| format!("Record with ID={} deleted from table \"{}\".", id, table_name),
        ),
        QueryResult::Help => HELP_TEXT.trim_matches('\n').to_string(),
        QueryResult::Exit => "Goodbye!".to_string(),
    }
}

fn per_id_lines(ids: &[i64], none: &str, line: impl Fn(i64) -> String) -> String {
    if ids.is_empty() {
        return none.to_string();
    }
    ids.iter().map(|id| line(*id)).collect::<Vec<_>>().join("\n")
}

/// Format records as a boxed grid, columns in schema order
pub fn format_records(schema: &Schema, records: &[Record]) -> String {
    let columns = schema.column_names();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            record
                .project(schema)
                .into_iter()
                .map(|value| value.map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    // Column widths in characters
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(*w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut lines = Vec::with_capacity(rows.len() + 5);
    lines.push(separator.clone());
    let header = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!(" {:^width$} ", c, width = *w))
        .collect::<Vec<_>>()
        .join("|");
    lines.push(format!("|{}|", header));
    lines.push(separator.clone());

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
            .collect::<Vec<_>>()
            .join("|");
        lines.push(format!("|{}|", line));
    }

    lines.push(separator);
    lines.push(format!("{} record(s) returned", rows.len()));
    lines.join("\n")
}
