//! CLI command implementations
//!
//! Each command runs once and exits. Query failures are written as error
//! responses on stdout; only failures of the command itself are returned.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::config::EngineConfig;
use crate::executor::QueryEngine;
use crate::parser::parse_query;
use crate::source::CsvRowSource;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{resolve_query, write_error_to, write_response_to};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query {
            data,
            config,
            infer_numbers,
            log,
            sql,
        } => {
            let options = QueryOptions {
                data,
                config,
                infer_numbers,
                log,
            };
            query(&options, resolve_query(sql)?)
        }
        Command::Parse { sql } => parse(&resolve_query(sql)?),
    }
}

/// Options for the `query` command
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub data: PathBuf,
    pub config: Option<PathBuf>,
    pub infer_numbers: bool,
    pub log: bool,
}

/// Execute one query against the CSV tables in `options.data`
pub fn query(options: &QueryOptions, sql: String) -> CliResult<()> {
    query_to(options, &sql, &mut io::stdout())
}

/// Execute one query, writing the response to `writer`
pub fn query_to<W: Write>(options: &QueryOptions, sql: &str, writer: &mut W) -> CliResult<()> {
    let engine = build_engine(options)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match rt.block_on(engine.execute(sql)) {
        Ok(rows) => write_response_to(
            Value::Array(rows.into_iter().map(Value::Object).collect()),
            writer,
        ),
        Err(e) => write_error_to(e.code(), &e.to_string(), writer),
    }
}

/// Parse a query and print the structured request
pub fn parse(sql: &str) -> CliResult<()> {
    parse_to(sql, &mut io::stdout())
}

/// Parse a query, writing the structured request to `writer`
pub fn parse_to<W: Write>(sql: &str, writer: &mut W) -> CliResult<()> {
    match parse_query(sql) {
        Ok(request) => write_response_to(
            serde_json::to_value(&request).map_err(|e| CliError::io_error(e.to_string()))?,
            writer,
        ),
        Err(e) => write_error_to(e.code().code(), &e.to_string(), writer),
    }
}

/// Builds an engine over the data directory with the loaded configuration.
///
/// Logging stays off unless `--log` is given, so stdout carries only the
/// response.
pub fn build_engine(options: &QueryOptions) -> CliResult<QueryEngine> {
    let config = load_config(options.config.as_deref())?;
    let config = if options.log { config } else { config.quiet() };

    let source = CsvRowSource::new(&options.data).with_number_inference(options.infer_numbers);
    Ok(QueryEngine::with_config(Arc::new(source), config))
}

fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::from_file(path)?),
        None => Ok(EngineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn options(dir: &Path) -> QueryOptions {
        QueryOptions {
            data: dir.to_path_buf(),
            config: None,
            infer_numbers: true,
            log: false,
        }
    }

    #[test]
    fn test_build_engine_defaults_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let engine = build_engine(&options(dir.path())).unwrap();
        assert!(!engine.config().log_events);
        assert!(!engine.config().like_matching);
    }

    #[test]
    fn test_build_engine_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("joinql.json");
        fs::write(&config_path, r#"{"like_matching": true}"#).unwrap();

        let mut opts = options(dir.path());
        opts.config = Some(config_path);

        let engine = build_engine(&opts).unwrap();
        assert!(engine.config().like_matching);
    }

    #[test]
    fn test_build_engine_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.config = Some(dir.path().join("missing.json"));

        let err = build_engine(&opts).unwrap_err();
        assert_eq!(err.code(), &super::super::errors::CliErrorCode::ConfigError);
    }

    fn response(write: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> Value {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_query_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("student.csv"), "id,name\n1,John\n2,Jane\n").unwrap();

        let value = response(|buf| {
            query_to(&options(dir.path()), "SELECT name FROM student WHERE id > 1", buf)
        });
        assert_eq!(value, json!({"status": "ok", "data": [{"name": "Jane"}]}));
    }

    #[test]
    fn test_query_missing_table_writes_error() {
        let dir = tempfile::tempdir().unwrap();

        let value = response(|buf| query_to(&options(dir.path()), "SELECT name FROM instructor", buf));
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "SOURCE_TABLE_NOT_FOUND");
        assert_eq!(value["message"], "Table not found: instructor");
    }

    #[test]
    fn test_parse_writes_request() {
        let sql = "SELECT student.name FROM student LEFT JOIN enrollment \
                   ON student.id = enrollment.student_id WHERE age > 20";
        let value = response(|buf| parse_to(sql, buf));

        assert_eq!(value["status"], "ok");
        let expected = serde_json::to_value(parse_query(sql).unwrap()).unwrap();
        assert_eq!(value["data"], expected);
        assert_eq!(value["data"]["table"], "student");
        assert_eq!(value["data"]["join"]["table"], "enrollment");
    }

    #[test]
    fn test_parse_writes_error() {
        let value = response(|buf| parse_to("SELECT FROM student", buf));
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "QUERY_INVALID_SELECT");
    }
}
