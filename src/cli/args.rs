//! CLI argument definitions using clap
//!
//! Commands:
//! - joinql query --data <dir> [--config <path>] [SQL]
//! - joinql parse [SQL]
//!
//! When SQL is omitted it is read from stdin as `{"query": "..."}`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// joinql - query CSV tables with SELECT / JOIN / WHERE
#[derive(Parser, Debug)]
#[command(name = "joinql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a single query and exit
    Query {
        /// Directory holding one `<table>.csv` per table
        #[arg(long, default_value = ".")]
        data: PathBuf,

        /// Path to an engine configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read numeric-looking cells as numbers
        #[arg(long)]
        infer_numbers: bool,

        /// Emit structured log lines to stdout/stderr
        #[arg(long)]
        log: bool,

        /// Query text
        sql: Option<String>,
    },

    /// Parse a query and print its structure
    Parse {
        /// Query text
        sql: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "joinql",
            "query",
            "--data",
            "/tmp/tables",
            "--infer-numbers",
            "SELECT id FROM student",
        ])
        .unwrap();

        match cli.command {
            Command::Query {
                data,
                config,
                infer_numbers,
                log,
                sql,
            } => {
                assert_eq!(data, PathBuf::from("/tmp/tables"));
                assert!(config.is_none());
                assert!(infer_numbers);
                assert!(!log);
                assert_eq!(sql.as_deref(), Some("SELECT id FROM student"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_without_sql() {
        let cli = Cli::try_parse_from(["joinql", "parse"]).unwrap();
        assert!(matches!(cli.command, Command::Parse { sql: None }));
    }
}
