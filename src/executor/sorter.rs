//! Result sorting for ORDER BY
//!
//! Stable and deterministic. Keys are applied left to right; later keys
//! break ties of earlier ones.

use std::cmp::Ordering;

use serde_json::Value;

use crate::parser::{OrderByField, SortDirection};
use crate::source::Row;

/// Sorts rows by ORDER BY keys
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts rows according to `keys`.
    ///
    /// Rows that compare equal on every key keep their relative order.
    pub fn sort(rows: &mut [Row], keys: &[OrderByField]) {
        if keys.is_empty() {
            return;
        }

        rows.sort_by(|a, b| {
            keys.iter()
                .map(|key| {
                    let ordering = Self::compare_values(a.get(&key.field), b.get(&key.field));
                    match key.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - missing < null < bool < number < string
    /// - For same types, natural ordering
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let a_type = type_order(a_val);
                let b_type = type_order(b_val);

                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        let a_f = a_n.as_f64().unwrap_or(0.0);
                        let b_f = b_n.as_f64().unwrap_or(0.0);
                        a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                    }
                    (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                    // nulls, arrays and objects tie
                    _ => Ordering::Equal,
                }
            }
        }
    }
}

fn type_order(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r["name"].as_str().unwrap()).collect()
    }

    fn people() -> Vec<Row> {
        vec![
            row(json!({"name": "c", "age": 30})),
            row(json!({"name": "a", "age": 20})),
            row(json!({"name": "b", "age": 25})),
        ]
    }

    #[test]
    fn test_sort_ascending() {
        let mut rows = people();
        ResultSorter::sort(&mut rows, &[OrderByField::asc("age")]);
        assert_eq!(names(&rows), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_descending() {
        let mut rows = people();
        ResultSorter::sort(&mut rows, &[OrderByField::desc("age")]);
        assert_eq!(names(&rows), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_stable() {
        let mut rows = vec![
            row(json!({"name": "x", "age": 25})),
            row(json!({"name": "y", "age": 25})),
            row(json!({"name": "z", "age": 25})),
        ];
        ResultSorter::sort(&mut rows, &[OrderByField::asc("age")]);
        assert_eq!(names(&rows), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_sort_multiple_keys() {
        let mut rows = vec![
            row(json!({"name": "b", "dept": "eng"})),
            row(json!({"name": "a", "dept": "ops"})),
            row(json!({"name": "c", "dept": "eng"})),
        ];
        ResultSorter::sort(
            &mut rows,
            &[OrderByField::asc("dept"), OrderByField::desc("name")],
        );
        assert_eq!(names(&rows), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_missing_and_null_sort_first() {
        let mut rows = vec![
            row(json!({"name": "n", "age": 1})),
            row(json!({"name": "m"})),
            row(json!({"name": "z", "age": null})),
        ];
        ResultSorter::sort(&mut rows, &[OrderByField::asc("age")]);
        assert_eq!(names(&rows), vec!["m", "z", "n"]);
    }

    #[test]
    fn test_no_keys_keeps_order() {
        let mut rows = people();
        ResultSorter::sort(&mut rows, &[]);
        assert_eq!(names(&rows), vec!["c", "a", "b"]);
    }
}
