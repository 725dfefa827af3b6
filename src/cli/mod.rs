//! CLI module for joinql
//!
//! Provides command-line interface for:
//! - query: One-shot query execution over a directory of CSV tables
//! - parse: Print the structured form of a query

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    build_engine, parse, parse_to, query, query_to, run, run_command, QueryOptions,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{
    read_request, resolve_query, write_error, write_error_to, write_response, write_response_to,
};
