//! joinql - SELECT / JOIN / WHERE queries over tabular row sources
//!
//! One main table, at most one equality join, conjunctive filters.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod observability;
pub mod parser;
pub mod source;

pub use config::{ConfigError, EngineConfig};
pub use error::{QueryError, QueryResult};
pub use executor::{QueryEngine, ResultRow};
pub use parser::{parse_query, QueryRequest};
pub use source::{CsvRowSource, MemoryRowSource, Row, RowSource};
