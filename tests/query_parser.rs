//! Query Parser Tests
//!
//! Parsing is pure and total over the supported grammar:
//! - Field lists, table and join are recovered exactly
//! - WHERE connectives are flattened into one conjunctive list
//! - Canonical rendering re-parses to an equal request
//! - Malformed text fails with a coded ParseError

use joinql::parser::{
    has_ungrouped_aggregate, parse_query, parse_where_clause, Condition, JoinCondition, JoinKind,
    JoinSpec, Operator, OrderByField, ParseErrorCode, QueryRequest,
};

// =============================================================================
// Structure Tests
// =============================================================================

#[test]
fn test_plain_select_structure() {
    let request = parse_query("SELECT f1,f2 FROM t").unwrap();

    assert_eq!(request.fields, vec!["f1", "f2"]);
    assert_eq!(request.table, "t");
    assert!(request.join.is_none());
    assert!(request.where_clauses.is_empty());
}

#[test]
fn test_and_conditions_are_ordered() {
    let conditions = parse_where_clause("a = 1 AND b = 2").unwrap();

    assert_eq!(
        conditions,
        vec![
            Condition::new("a", Operator::Eq, "1"),
            Condition::new("b", Operator::Eq, "2"),
        ]
    );
}

#[test]
fn test_or_is_flattened_like_and() {
    let and = parse_query("SELECT a FROM t WHERE a = 1 AND b = 2").unwrap();
    let or = parse_query("SELECT a FROM t WHERE a = 1 OR b = 2").unwrap();
    assert_eq!(and.where_clauses, or.where_clauses);
}

#[test]
fn test_quoted_literal_keeps_keywords() {
    let request = parse_query("SELECT a FROM t WHERE name = 'Rock AND Roll'").unwrap();
    assert_eq!(
        request.where_clauses,
        vec![Condition::new("name", Operator::Eq, "Rock AND Roll")]
    );
}

#[test]
fn test_like_condition_parsed() {
    let request = parse_query("SELECT name FROM student WHERE name LIKE '%Jo%'").unwrap();
    assert_eq!(
        request.where_clauses,
        vec![Condition::new("name", Operator::Like, "%Jo%")]
    );
}

#[test]
fn test_join_with_all_clauses() {
    let request = parse_query(
        "SELECT student.name, enrollment.course FROM student \
         RIGHT JOIN enrollment ON student.id = enrollment.student_id \
         WHERE student.age >= 22 GROUP BY enrollment.course \
         ORDER BY student.name DESC, enrollment.course",
    )
    .unwrap();

    let join = request.join.as_ref().unwrap();
    assert_eq!(join.kind, JoinKind::Right);
    assert_eq!(join.table, "enrollment");
    assert_eq!(join.condition.left_table(), "student");
    assert_eq!(join.condition.right_field(), "student_id");
    assert_eq!(
        request.where_clauses,
        vec![Condition::new("student.age", Operator::Gte, "22")]
    );
    assert_eq!(
        request.group_by_fields,
        Some(vec!["enrollment.course".to_string()])
    );
    assert_eq!(
        request.order_by_fields,
        Some(vec![
            OrderByField::desc("student.name"),
            OrderByField::asc("enrollment.course"),
        ])
    );
    assert!(!request.has_ungrouped_aggregate);
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_ignores_whitespace() {
    let queries = [
        "SELECT   id ,  name   FROM   student   WHERE  age  >  20",
        "select id, name from student where age > 20",
        "SELECT student.name, enrollment.course FROM student\n  LEFT JOIN enrollment\n  ON student.id = enrollment.student_id\n  WHERE enrollment.course = 'Physics' AND student.age <= 30",
        "SELECT * FROM t WHERE a != 'x y' ORDER BY a DESC",
    ];

    for query in queries {
        let request = parse_query(query).unwrap();
        let rendered = request.to_string();
        let reparsed = parse_query(&rendered).unwrap();
        assert_eq!(reparsed, request, "round trip of {:?} via {:?}", query, rendered);
    }
}

#[test]
fn test_canonical_rendering() {
    let request = parse_query("select  id,name  from  student  where age > 20").unwrap();
    assert_eq!(
        request.to_string(),
        "SELECT id, name FROM student WHERE age > 20"
    );
}

#[test]
fn test_built_request_renders_parseable_text() {
    let request = QueryRequest::new(["name"], "student")
        .with_condition(Condition::new("name", Operator::NotEq, "Jane Doe"));

    assert_eq!(parse_query(&request.to_string()).unwrap(), request);
}

#[test]
fn test_built_join_request_matches_parsed() {
    let built = QueryRequest::new(["student.name"], "student")
        .with_join(JoinSpec {
            kind: JoinKind::Right,
            table: "enrollment".into(),
            condition: JoinCondition::new("student.id", "enrollment.student_id"),
        })
        .with_condition(Condition::new("enrollment.course", Operator::Eq, "Math"));

    let parsed = parse_query(
        "SELECT student.name FROM student right join enrollment \
         ON student.id = enrollment.student_id WHERE enrollment.course = 'Math'",
    )
    .unwrap();

    assert!(parsed.has_join());
    assert!(!parse_query("SELECT name FROM student").unwrap().has_join());
    assert_eq!(parsed, built);
}

// =============================================================================
// Aggregate Detection Tests
// =============================================================================

#[test]
fn test_ungrouped_aggregate_detection() {
    assert!(has_ungrouped_aggregate("SELECT COUNT(*) FROM t", None));
    assert!(parse_query("SELECT COUNT(*) FROM t").unwrap().has_ungrouped_aggregate);
    assert!(!parse_query("SELECT COUNT(*) FROM t GROUP BY c").unwrap().has_ungrouped_aggregate);
    assert!(!parse_query("SELECT c FROM t").unwrap().has_ungrouped_aggregate);
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_missing_field_list_rejected() {
    let err = parse_query("SELECT FROM t").unwrap_err();
    assert_eq!(err.code(), ParseErrorCode::InvalidSelect);
}

#[test]
fn test_malformed_queries_rejected() {
    let cases = [
        ("FROM t", ParseErrorCode::InvalidSelect),
        ("SELECT a FROM", ParseErrorCode::InvalidSelect),
        ("SELECT a FROM t INNER JOIN u", ParseErrorCode::InvalidJoin),
        ("SELECT a FROM t LEFT JOIN u ON t.id > u.id", ParseErrorCode::InvalidJoin),
        ("SELECT a FROM t WHERE", ParseErrorCode::InvalidWhere),
        ("SELECT a FROM t WHERE a", ParseErrorCode::InvalidWhere),
        ("SELECT a FROM t ORDER BY a SIDEWAYS", ParseErrorCode::InvalidOrderBy),
    ];

    for (query, code) in cases {
        let err = parse_query(query).unwrap_err();
        assert_eq!(err.code(), code, "query {:?}", query);
    }
}

#[test]
fn test_parse_error_display_carries_code() {
    let err = parse_query("SELECT FROM t").unwrap_err();
    assert!(err.to_string().contains("QUERY_INVALID_SELECT"));
}
