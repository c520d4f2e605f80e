//! PlainDB - CLI

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use plaindb::executor::QueryResult;
use plaindb::session::{hooks, render, Session};
use plaindb::storage::{JsonStorage, MemoryStorage, Storage};
use plaindb::Config;

const PROMPT: &str = "plaindb> ";

/// Print welcome banner
fn print_banner() {
    println!(
        r#"
 PlainDB - a minimal table store
 Type 'help' for help, 'exit' to quit
"#
    );
}

/// PlainDB - a minimal single-user table store
#[derive(Parser, Debug)]
#[command(name = "plaindb")]
#[command(version)]
#[command(about = "A minimal single-user table store with a SQL-like command language")]
struct Cli {
    /// Load settings from a JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for table documents (default: data)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog document path (default: db_meta.json)
    #[arg(long, value_name = "PATH")]
    meta: Option<PathBuf>,

    /// Do not ask before drop_table and delete
    #[arg(short, long)]
    yes: bool,

    /// Print how long each command took
    #[arg(long)]
    timing: bool,

    /// Disable select caching
    #[arg(long)]
    no_cache: bool,

    /// Keep everything in memory
    #[arg(long)]
    in_memory: bool,

    /// Persist line-editor history to a file
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (default: warn)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

impl Cli {
    /// Start from the config file, if any, then apply the flags on top
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::new(),
        };

        if let Some(dir) = self.data_dir {
            config = config.data_dir(dir);
        }
        if let Some(path) = self.meta {
            config = config.meta_path(path);
        }
        if let Some(path) = self.history {
            config = config.history_file(path);
        }
        if let Some(level) = self.log_level {
            config = config.log_level(level);
        }
        if self.yes {
            config = config.confirm_destructive(false);
        }
        if self.timing {
            config = config.show_timing(true);
        }
        if self.no_cache {
            config = config.cache_selects(false);
        }
        if self.in_memory {
            config = config.in_memory(true);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Initialize logging on stderr
fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

/// Ask a yes/no question on the line editor
fn ask(editor: &mut DefaultEditor, question: &str) -> bool {
    match editor.readline(question) {
        Ok(answer) => hooks::is_affirmative(&answer),
        Err(_) => false,
    }
}

/// Execute one line; returns `false` when the session should end
fn run_line<S: Storage>(
    session: &mut Session<S>,
    editor: &mut DefaultEditor,
    config: &Config,
    line: &str,
) -> bool {
    let command = match session.parse(line) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            return true;
        }
    };

    let label = command.verb();
    let needs_confirmation = config.confirm_destructive && command.is_destructive();
    let action_name = command.action_name();

    let action = || {
        let (result, elapsed) = hooks::timed(label, || session.execute(command));
        result.map(|result| (result, elapsed))
    };
    let outcome = if needs_confirmation {
        hooks::confirm_action(&action_name, |question| ask(editor, question), action)
    } else {
        action().map(Some)
    };

    match outcome {
        Ok(Some((result, elapsed))) => {
            println!("{}", render(&result));
            if config.show_timing {
                println!("{}", hooks::format_elapsed(label, elapsed));
            }
            !matches!(result, QueryResult::Exit)
        }
        Ok(None) => {
            println!("Operation cancelled.");
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            true
        }
    }
}

/// Main REPL loop
fn run_repl<S: Storage>(mut session: Session<S>, config: &Config) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| anyhow::anyhow!("failed to start line editor: {}", e))?;

    if let Some(path) = config.history_file.as_ref().filter(|p| p.exists()) {
        if let Err(e) = editor.load_history(path) {
            warn!(path = %path.display(), error = %e, "could not load history");
        }
    }

    print_banner();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line) {
                    warn!(error = %e, "could not add history entry");
                }

                if !run_line(&mut session, &mut editor, config, line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Type 'exit' to quit.");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => bail!("failed to read input: {}", e),
        }
    }

    if let Some(path) = &config.history_file {
        if let Err(e) = editor.save_history(path) {
            warn!(path = %path.display(), error = %e, "could not save history");
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.log_level)?;
    debug!(?config, "starting session");

    if config.in_memory {
        run_repl(Session::new(MemoryStorage::new(), config.clone()), &config)
    } else {
        let storage = JsonStorage::new(config.meta_path.clone(), config.data_dir.clone());
        run_repl(Session::new(storage, config.clone()), &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let config = Cli::try_parse_from(["plaindb"]).unwrap().into_config().unwrap();
        assert!(config.confirm_destructive);
        assert!(config.cache_selects);
        assert!(!config.in_memory);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plaindb.json");
        std::fs::write(&path, r#"{"data_dir": "from_file", "show_timing": false}"#).unwrap();

        let cli = Cli::try_parse_from([
            "plaindb",
            "--config",
            path.to_str().unwrap(),
            "--data-dir",
            "from_flag",
            "-y",
            "--timing",
            "--no-cache",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("from_flag"));
        assert!(!config.confirm_destructive);
        assert!(config.show_timing);
        assert!(!config.cache_selects);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["plaindb", "--frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["plaindb", "--data-dir"]).is_err());
    }
}
