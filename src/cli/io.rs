//! JSON I/O handling for CLI
//!
//! - Input: query text as an argument, or `{"query": "..."}` on stdin
//! - Output: single JSON object on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Returns `sql`, or reads a `{"query": "..."}` request from stdin
pub fn resolve_query(sql: Option<String>) -> CliResult<String> {
    match sql {
        Some(sql) => Ok(sql),
        None => read_request(&mut io::stdin().lock()),
    }
}

/// Read a JSON request line and return its query text
pub fn read_request<R: BufRead>(reader: &mut R) -> CliResult<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::invalid_request("Empty input"));
    }

    let value: Value = serde_json::from_str(&line)?;
    value
        .get("query")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CliError::invalid_request("Request must contain a string \"query\""))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(data, &mut io::stdout())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(code, message, &mut io::stdout())
}

/// Write a success response to `writer`
pub fn write_response_to<W: Write>(data: Value, writer: &mut W) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_value_to(&response, writer)
}

/// Write an error response to `writer`
pub fn write_error_to<W: Write>(code: &str, message: &str, writer: &mut W) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_value_to(&response, writer)
}

fn write_value_to<W: Write>(value: &Value, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value).map_err(|e| CliError::io_error(e.to_string()))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
