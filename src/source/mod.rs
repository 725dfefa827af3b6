//! Row sources
//!
//! The executor reads tables through [`RowSource`]. How rows are stored
//! (files, memory, network) is the source's concern; the engine only
//! requires each load to return every row of the named table in storage
//! order, as a consistent snapshot.

mod csv;
mod errors;
mod memory;

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

pub use self::csv::CsvRowSource;
pub use errors::{SourceError, SourceResult};
pub use memory::MemoryRowSource;

/// One record: field name to value, in insertion order
pub type Row = Map<String, Value>;

/// Loads all rows of a named table
pub trait RowSource: Send + Sync {
    /// Returns the rows of `table` in storage order.
    ///
    /// Fails with [`SourceError::TableNotFound`] when the table is missing.
    fn load<'a>(
        &'a self,
        table: &'a str,
    ) -> Pin<Box<dyn Future<Output = SourceResult<Vec<Row>>> + Send + 'a>>;
}
