//! Query parser subsystem for joinql
//!
//! Turns loosely structured query text into a typed [`QueryRequest`].
//!
//! # Stages (fixed order)
//!
//! 1. Clause extraction: ORDER BY, then GROUP BY, then WHERE
//! 2. SELECT / JOIN parsing of the remaining fragment
//! 3. WHERE condition parsing
//! 4. Ungrouped aggregate detection on the original text
//!
//! Each stage is a pure function of its input text.
//!
//! # Grammar
//!
//! ```text
//! SELECT <field>[,<field>...] FROM <table>
//!   [ (INNER|LEFT|RIGHT) JOIN <table> ON <table.field> = <table.field> ]
//!   [ WHERE <cond> [ (AND|OR) <cond> ... ] ]
//!   [ GROUP BY <field>[,<field>...] ]
//!   [ ORDER BY <field> [ASC|DESC] [,<field> [ASC|DESC]...] ]
//! ```
//!
//! Keywords are case-insensitive. AND and OR both mean AND.

mod ast;
mod clauses;
mod errors;
mod parser;
mod predicate;
mod scanner;
mod select;

pub use ast::{
    split_qualified, Condition, JoinCondition, JoinKind, JoinSpec, Operator, OrderByField,
    QueryRequest, SortDirection,
};
pub use clauses::{extract_clauses, ExtractedClauses};
pub use errors::{ParseError, ParseErrorCode, ParseResult};
pub use parser::{has_ungrouped_aggregate, parse_query};
pub use predicate::{parse_condition, parse_where_clause};
pub use select::{parse_select_clause, SelectClause};
