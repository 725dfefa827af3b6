//! Two-table equality joins
//!
//! A main row and a join row match iff
//! `main[condition.left_field()] == join[condition.right_field()]`, both
//! present and non-null. Table qualifiers in the condition do not route
//! the comparison; they only matter for the projected fields.
//!
//! Combined records hold one entry per requested field:
//!
//! - `table.field` with `table == main_table` reads `field` from the main row
//! - any other `table.field` reads `field` from the join row
//! - an unqualified field reads from the main row when it has the key,
//!   otherwise from the join row
//!
//! The unmatched side of an outer join reads as null.

use serde_json::Value;

use crate::parser::{split_qualified, JoinCondition, JoinKind};
use crate::source::Row;

/// Nested-loop join over two row sets
pub struct JoinEngine;

impl JoinEngine {
    /// Joins `main_rows` with `join_rows` under `kind` semantics.
    ///
    /// INNER and LEFT keep main-row order, RIGHT keeps join-row order;
    /// matches for one driving row appear in the other side's order.
    /// No deduplication: a row matching k rows yields k records.
    pub fn join(
        kind: JoinKind,
        main_rows: &[Row],
        join_rows: &[Row],
        condition: &JoinCondition,
        fields: &[String],
        main_table: &str,
    ) -> Vec<Row> {
        let combiner = Combiner { fields, main_table };

        match kind {
            JoinKind::Inner => main_rows
                .iter()
                .flat_map(|main| {
                    join_rows
                        .iter()
                        .filter(move |join| keys_match(main, join, condition))
                        .map(move |join| combiner.combine(Some(main), Some(join)))
                })
                .collect(),
            JoinKind::Left => main_rows
                .iter()
                .flat_map(|main| {
                    let matches: Vec<&Row> = join_rows
                        .iter()
                        .filter(|join| keys_match(main, join, condition))
                        .collect();
                    if matches.is_empty() {
                        vec![combiner.combine(Some(main), None)]
                    } else {
                        matches
                            .into_iter()
                            .map(|join| combiner.combine(Some(main), Some(join)))
                            .collect()
                    }
                })
                .collect(),
            JoinKind::Right => join_rows
                .iter()
                .flat_map(|join| {
                    let matches: Vec<&Row> = main_rows
                        .iter()
                        .filter(|main| keys_match(main, join, condition))
                        .collect();
                    if matches.is_empty() {
                        vec![combiner.combine(None, Some(join))]
                    } else {
                        matches
                            .into_iter()
                            .map(|main| combiner.combine(Some(main), Some(join)))
                            .collect()
                    }
                })
                .collect(),
        }
    }
}

fn keys_match(main: &Row, join: &Row, condition: &JoinCondition) -> bool {
    match (
        main.get(condition.left_field()),
        join.get(condition.right_field()),
    ) {
        (Some(Value::Null), _) | (_, Some(Value::Null)) => false,
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Builds combined records for a fixed field list
#[derive(Clone, Copy)]
struct Combiner<'a> {
    fields: &'a [String],
    main_table: &'a str,
}

impl Combiner<'_> {
    fn combine(&self, main: Option<&Row>, join: Option<&Row>) -> Row {
        self.fields
            .iter()
            .map(|field| (field.clone(), self.resolve(field, main, join)))
            .collect()
    }

    fn resolve(&self, field: &str, main: Option<&Row>, join: Option<&Row>) -> Value {
        let (table, name) = split_qualified(field);

        let side = if table.is_empty() {
            if main.is_some_and(|row| row.contains_key(name)) {
                main
            } else {
                join
            }
        } else if table == self.main_table {
            main
        } else {
            join
        };

        side.and_then(|row| row.get(name))
            .cloned()
            .unwrap_or(Value::Null)
    }
}
