//! Query execution for joinql
//!
//! Turns a parsed [`QueryRequest`](crate::parser::QueryRequest) into
//! result rows.
//!
//! # Execution Flow (strict order)
//!
//! 1. Load the main table from the row source
//! 2. Load the join table and join (INNER / LEFT / RIGHT)
//! 3. Filter by WHERE conditions (AND semantics)
//! 4. Sort by ORDER BY when enabled
//! 5. Project the requested fields in request order
//!
//! # Invariants
//!
//! - Same rows + same request = same results, in the same order
//! - Errors propagate unchanged; no partial results

mod errors;
mod executor;
mod filters;
mod join;
mod pattern;
mod result;
mod sorter;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use executor::QueryEngine;
pub use filters::{evaluate, PredicateEvaluator};
pub use join::JoinEngine;
pub use result::{expand_join_wildcard, project, ResultRow};
pub use sorter::ResultSorter;
