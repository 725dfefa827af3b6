//! Result rows and projection

use serde_json::Value;

use crate::source::Row;

/// A projected row: exactly the requested fields, in request order
pub type ResultRow = Row;

/// Projects `row` onto `fields`.
///
/// `*` copies every entry of the row; a field the row lacks maps to null.
pub fn project(row: &Row, fields: &[String]) -> ResultRow {
    let mut projected = ResultRow::new();
    for field in fields {
        if field == "*" {
            for (key, value) in row {
                projected.insert(key.clone(), value.clone());
            }
        } else {
            let value = row.get(field).cloned().unwrap_or(Value::Null);
            projected.insert(field.clone(), value);
        }
    }
    projected
}

/// Replaces `*` in a join's field list with the qualified keys of both tables.
///
/// Main-table keys come first, then join-table keys, each in order of
/// first appearance across the table's rows. Other fields pass through.
pub fn expand_join_wildcard(
    fields: &[String],
    main_table: &str,
    main_rows: &[Row],
    join_table: &str,
    join_rows: &[Row],
) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::with_capacity(fields.len());
    for field in fields {
        if field == "*" {
            expanded.extend(qualified_keys(main_table, main_rows));
            expanded.extend(qualified_keys(join_table, join_rows));
        } else {
            expanded.push(field.clone());
        }
    }
    expanded
}

fn qualified_keys(table: &str, rows: &[Row]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        let qualified = format!("{}.{}", table, key);
        if !keys.contains(&qualified) {
            keys.push(qualified);
        }
    }
    keys
}
