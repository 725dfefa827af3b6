//! In-memory row source

use std::collections::HashMap;
use std::future::{ready, Future};
use std::pin::Pin;

use serde_json::Value;

use super::errors::{SourceError, SourceResult};
use super::{Row, RowSource};

/// Row source backed by tables held in memory.
///
/// Each load returns a clone of the stored rows, so callers always see a
/// consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    tables: HashMap<String, Vec<Row>>,
}

impl MemoryRowSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table (builder style)
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert_table(name, rows);
        self
    }

    /// Adds or replaces a table
    pub fn insert_table(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(name.into(), rows);
    }

    /// Returns true if the table exists
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Builds a source from a JSON document of the form
    /// `{"table": [{"field": value, ...}, ...], ...}`.
    pub fn from_json(document: &str) -> SourceResult<Self> {
        let parsed: Value = serde_json::from_str(document)
            .map_err(|e| SourceError::read_failed("<document>", e.to_string()))?;

        let tables = match parsed {
            Value::Object(tables) => tables,
            _ => {
                return Err(SourceError::read_failed(
                    "<document>",
                    "expected an object of tables",
                ))
            }
        };

        let mut source = Self::new();
        for (name, rows) in tables {
            let rows = match rows {
                Value::Array(rows) => rows,
                _ => return Err(SourceError::read_failed(name, "expected an array of rows")),
            };

            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| match row {
                    Value::Object(row) => Ok(row),
                    _ => Err(SourceError::read_failed(
                        name.as_str(),
                        format!("row {} is not an object", i),
                    )),
                })
                .collect::<SourceResult<Vec<Row>>>()?;

            source.insert_table(name, rows);
        }

        Ok(source)
    }
}

impl RowSource for MemoryRowSource {
    fn load<'a>(
        &'a self,
        table: &'a str,
    ) -> Pin<Box<dyn Future<Output = SourceResult<Vec<Row>>> + Send + 'a>> {
        let result = self
            .tables
            .get(table)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table.to_string()));
        Box::pin(ready(result))
    }
}
