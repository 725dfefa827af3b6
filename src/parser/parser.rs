//! Query parser
//!
//! Composes the clause stages into one [`QueryRequest`]:
//!
//! 1. Extract ORDER BY, GROUP BY and WHERE
//! 2. Parse SELECT fields, table and JOIN
//! 3. Parse WHERE conditions
//! 4. Flag aggregates used without GROUP BY
//!
//! Parsing is pure: same text, same request.

use std::sync::OnceLock;

use regex::Regex;

use super::ast::QueryRequest;
use super::clauses::extract_clauses;
use super::errors::{ParseError, ParseResult};
use super::predicate::parse_where_clause;
use super::select::parse_select_clause;

static AGGREGATE_CALL: OnceLock<Regex> = OnceLock::new();

fn aggregate_call() -> &'static Regex {
    AGGREGATE_CALL.get_or_init(|| {
        Regex::new(r"(?i)\b(COUNT|AVG|SUM|MIN|MAX)\s*\(\s*(\*|\w+)\s*\)")
            .expect("aggregate pattern is valid")
    })
}

/// Parses query text into a structured request.
pub fn parse_query(query: &str) -> ParseResult<QueryRequest> {
    let clauses = extract_clauses(query)?;
    let select = parse_select_clause(clauses.select_fragment)?;

    if let Some(join) = &select.join {
        if !join.condition.is_qualified() {
            return Err(ParseError::invalid_join(format!(
                "JOIN operands must be table.field: '{} = {}'",
                join.condition.left, join.condition.right
            )));
        }
    }

    let where_clauses = match clauses.where_fragment {
        Some(fragment) => parse_where_clause(fragment)?,
        None => Vec::new(),
    };

    let has_ungrouped_aggregate =
        has_ungrouped_aggregate(query, clauses.group_by_fields.as_deref());

    Ok(QueryRequest {
        fields: select.fields,
        table: select.table,
        where_clauses,
        join: select.join,
        group_by_fields: clauses.group_by_fields,
        order_by_fields: clauses.order_by_fields,
        has_ungrouped_aggregate,
    })
}

/// True if `query` calls COUNT/AVG/SUM/MIN/MAX and there is no GROUP BY.
pub fn has_ungrouped_aggregate(query: &str, group_by_fields: Option<&[String]>) -> bool {
    group_by_fields.is_none() && aggregate_call().is_match(query)
}
