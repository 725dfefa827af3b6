//! CSV-backed row source
//!
//! Table `t` is the file `<dir>/t.csv`. The first record is the header;
//! every later record becomes one row keyed by header names, in file
//! order. Cells are text unless number inference is switched on.
//!
//! Quoting follows the usual CSV conventions: a field wrapped in double
//! quotes may contain commas and line breaks, and `""` inside it is a
//! literal quote. Blank lines are skipped.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use serde_json::{Number, Value};

use super::errors::{SourceError, SourceResult};
use super::{Row, RowSource};

/// Reads tables from `.csv` files in one directory
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    dir: PathBuf,
    infer_numbers: bool,
}

impl CsvRowSource {
    /// Source over the `.csv` files in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            infer_numbers: false,
        }
    }

    /// Turns cells that parse as numbers into JSON numbers
    pub fn with_number_inference(mut self, infer_numbers: bool) -> Self {
        self.infer_numbers = infer_numbers;
        self
    }

    /// Directory the tables are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `table`
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", table))
    }

    async fn read_table(&self, table: &str) -> SourceResult<Vec<Row>> {
        let path = self.table_path(table);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::TableNotFound(table.to_string()))
            }
            Err(e) => return Err(SourceError::read_failed(table, e.to_string())),
        };

        let mut records = parse_records(&contents)
            .map_err(|reason| SourceError::read_failed(table, reason))?
            .into_iter();

        let header = match records.next() {
            Some(header) => header,
            None => return Ok(Vec::new()),
        };

        records
            .enumerate()
            .map(|(i, record)| {
                if record.len() != header.len() {
                    return Err(SourceError::read_failed(
                        table,
                        format!(
                            "record {} has {} fields, header has {}",
                            i + 1,
                            record.len(),
                            header.len()
                        ),
                    ));
                }
                Ok(header
                    .iter()
                    .cloned()
                    .zip(record.into_iter().map(|cell| self.cell_value(cell)))
                    .collect())
            })
            .collect()
    }

    fn cell_value(&self, cell: String) -> Value {
        if self.infer_numbers {
            if let Some(number) = infer_number(&cell) {
                return Value::Number(number);
            }
        }
        Value::String(cell)
    }
}

impl RowSource for CsvRowSource {
    fn load<'a>(
        &'a self,
        table: &'a str,
    ) -> Pin<Box<dyn Future<Output = SourceResult<Vec<Row>>> + Send + 'a>> {
        Box::pin(self.read_table(table))
    }
}

fn infer_number(cell: &str) -> Option<Number> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::from(i));
    }
    trimmed.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Splits CSV text into records of fields.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>, String> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => end_record(&mut records, &mut record, &mut field),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    end_record(&mut records, &mut record, &mut field);
    Ok(records)
}

fn end_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    // blank line
    if record.is_empty() && field.trim().is_empty() {
        field.clear();
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
