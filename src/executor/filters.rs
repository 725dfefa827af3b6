//! Predicate evaluation
//!
//! Applies one [`Condition`] to one row. The literal on the right-hand
//! side is text; the row value decides how it is compared:
//!
//! - number row value and numeric literal: numeric comparison
//! - string row value: lexicographic comparison with the literal
//! - bool, or number against a non-numeric literal: compared as text
//! - missing or null: only `!=` holds
//!
//! No other coercion is performed.

use std::cmp::Ordering;

use serde_json::Value;

use super::errors::{ExecutorError, ExecutorResult};
use super::pattern::like_match;
use crate::parser::{Condition, Operator};
use crate::source::Row;

/// Evaluates conditions against rows
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateEvaluator {
    like_matching: bool,
}

impl PredicateEvaluator {
    /// Evaluator for the base pipeline: LIKE is rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator with LIKE pattern matching switched on or off
    pub fn with_like_matching(like_matching: bool) -> Self {
        Self { like_matching }
    }

    /// Checks if a row satisfies every condition (AND semantics).
    ///
    /// Stops at the first failing condition or error.
    pub fn matches_all(&self, row: &Row, conditions: &[Condition]) -> ExecutorResult<bool> {
        for condition in conditions {
            if !self.evaluate(row, condition)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Checks a single condition against a row
    pub fn evaluate(&self, row: &Row, condition: &Condition) -> ExecutorResult<bool> {
        let actual = row.get(&condition.field);

        if condition.operator == Operator::Like {
            return self.evaluate_like(actual, condition);
        }

        let ordering = match actual {
            None | Some(Value::Null) => return Ok(condition.operator == Operator::NotEq),
            Some(Value::String(s)) => Some(s.as_str().cmp(condition.value.as_str())),
            Some(Value::Number(n)) => match (n.as_f64(), condition.value.trim().parse::<f64>()) {
                (Some(a), Ok(b)) => a.partial_cmp(&b),
                _ => Some(n.to_string().as_str().cmp(condition.value.as_str())),
            },
            Some(Value::Bool(b)) => Some(b.to_string().as_str().cmp(condition.value.as_str())),
            Some(other) => {
                return Err(ExecutorError::unsupported_operator(
                    &condition.field,
                    condition.operator.as_str(),
                    kind_name(other),
                ))
            }
        };

        Ok(match ordering {
            Some(ord) => holds(condition.operator, ord),
            // NaN compares unequal to everything
            None => condition.operator == Operator::NotEq,
        })
    }

    fn evaluate_like(&self, actual: Option<&Value>, condition: &Condition) -> ExecutorResult<bool> {
        if !self.like_matching {
            return Err(ExecutorError::like_not_supported(&condition.field));
        }

        match actual {
            None | Some(Value::Null) => Ok(false),
            Some(Value::String(s)) => Ok(like_match(s, &condition.value)),
            Some(Value::Number(n)) => Ok(like_match(&n.to_string(), &condition.value)),
            Some(Value::Bool(b)) => Ok(like_match(&b.to_string(), &condition.value)),
            Some(other) => Err(ExecutorError::unsupported_operator(
                &condition.field,
                "LIKE",
                kind_name(other),
            )),
        }
    }
}

/// Evaluates `condition` against `row` with the base-pipeline evaluator.
pub fn evaluate(row: &Row, condition: &Condition) -> ExecutorResult<bool> {
    PredicateEvaluator::new().evaluate(row, condition)
}

fn holds(operator: Operator, ord: Ordering) -> bool {
    match operator {
        Operator::Eq => ord == Ordering::Equal,
        Operator::NotEq => ord != Ordering::Equal,
        Operator::Gt => ord == Ordering::Greater,
        Operator::Lt => ord == Ordering::Less,
        Operator::Gte => ord != Ordering::Less,
        Operator::Lte => ord != Ordering::Greater,
        Operator::Like => false,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorErrorCode;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn cond(field: &str, op: Operator, value: &str) -> Condition {
        Condition::new(field, op, value)
    }

    #[test]
    fn test_numeric_greater_than() {
        assert!(evaluate(&row(json!({"x": 5})), &cond("x", Operator::Gt, "3")).unwrap());
        assert!(!evaluate(&row(json!({"x": 5})), &cond("x", Operator::Gt, "10")).unwrap());
        assert!(evaluate(&row(json!({"x": 5})), &cond("x", Operator::Eq, "5.0")).unwrap());
    }

    #[test]
    fn test_text_comparison_is_lexicographic() {
        let r = row(json!({"age": "9"}));
        // "9" > "10" as text
        assert!(evaluate(&r, &cond("age", Operator::Gt, "10")).unwrap());
        assert!(evaluate(&r, &cond("age", Operator::Eq, "9")).unwrap());
        assert!(evaluate(&r, &cond("age", Operator::Gte, "9")).unwrap());
        assert!(evaluate(&r, &cond("age", Operator::Lte, "9")).unwrap());
        assert!(!evaluate(&r, &cond("age", Operator::Lt, "9")).unwrap());
    }

    #[test]
    fn test_not_equal() {
        let r = row(json!({"name": "John"}));
        assert!(evaluate(&r, &cond("name", Operator::NotEq, "Jane")).unwrap());
        assert!(!evaluate(&r, &cond("name", Operator::NotEq, "John")).unwrap());
    }

    #[test]
    fn test_missing_and_null_values() {
        let r = row(json!({"name": null}));
        assert!(!evaluate(&r, &cond("name", Operator::Eq, "John")).unwrap());
        assert!(evaluate(&r, &cond("name", Operator::NotEq, "John")).unwrap());
        assert!(!evaluate(&r, &cond("age", Operator::Gt, "1")).unwrap());
    }

    #[test]
    fn test_bool_compared_as_text() {
        let r = row(json!({"active": true}));
        assert!(evaluate(&r, &cond("active", Operator::Eq, "true")).unwrap());
    }

    #[test]
    fn test_like_rejected_by_default() {
        let err = evaluate(&row(json!({"name": "John"})), &cond("name", Operator::Like, "J%"))
            .unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::LikeNotSupported);
    }

    #[test]
    fn test_like_matching_enabled() {
        let evaluator = PredicateEvaluator::with_like_matching(true);
        let r = row(json!({"name": "Jane Doe", "id": 42}));
        assert!(evaluator.evaluate(&r, &cond("name", Operator::Like, "%Jane%")).unwrap());
        assert!(!evaluator.evaluate(&r, &cond("name", Operator::Like, "John%")).unwrap());
        assert!(evaluator.evaluate(&r, &cond("id", Operator::Like, "4_")).unwrap());
        assert!(!evaluator.evaluate(&r, &cond("missing", Operator::Like, "%")).unwrap());
    }

    #[test]
    fn test_ordering_on_array_unsupported() {
        let err = evaluate(&row(json!({"tags": ["a"]})), &cond("tags", Operator::Gt, "a"))
            .unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::UnsupportedOperator);
    }

    #[test]
    fn test_matches_all_conjoins() {
        let evaluator = PredicateEvaluator::new();
        let r = row(json!({"age": 25, "name": "John"}));

        let both = vec![cond("age", Operator::Gte, "18"), cond("name", Operator::Eq, "John")];
        assert!(evaluator.matches_all(&r, &both).unwrap());

        let one_fails = vec![cond("age", Operator::Gte, "18"), cond("name", Operator::Eq, "Jane")];
        assert!(!evaluator.matches_all(&r, &one_fails).unwrap());

        assert!(evaluator.matches_all(&r, &[]).unwrap());
    }

    #[test]
    fn test_matches_all_short_circuits_before_error() {
        let evaluator = PredicateEvaluator::new();
        let r = row(json!({"age": 10, "name": "John"}));
        let conditions = vec![cond("age", Operator::Gt, "18"), cond("name", Operator::Like, "J%")];
        assert!(!evaluator.matches_all(&r, &conditions).unwrap());
    }
}
