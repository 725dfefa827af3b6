//! Query request structures
//!
//! Defines the parsed representation handed from the parser to the executor.

use std::fmt;

use serde::Serialize;

/// Comparison operators recognized in WHERE conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    /// field = value
    #[serde(rename = "=")]
    Eq,
    /// field != value
    #[serde(rename = "!=")]
    NotEq,
    /// field > value
    #[serde(rename = ">")]
    Gt,
    /// field < value
    #[serde(rename = "<")]
    Lt,
    /// field >= value
    #[serde(rename = ">=")]
    Gte,
    /// field <= value
    #[serde(rename = "<=")]
    Lte,
    /// field LIKE 'pattern'
    #[serde(rename = "LIKE")]
    Like,
}

impl Operator {
    /// Comparison operators in match priority order.
    ///
    /// Two-character operators come first so `>=` is never read as `>`.
    pub const COMPARISONS: [Operator; 6] = [
        Operator::NotEq,
        Operator::Gte,
        Operator::Lte,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
    ];

    /// Returns the operator token as written in query text
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single atomic WHERE condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Field name, bare or table-qualified
    pub field: String,
    /// Operator
    pub operator: Operator,
    /// Raw literal text, single quotes removed
    pub value: String,
}

impl Condition {
    /// Create a condition
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Returns true if this is a LIKE condition
    pub fn is_like(&self) -> bool {
        self.operator == Operator::Like
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_like() || self.value.parse::<f64>().is_err() {
            write!(f, "{} {} '{}'", self.field, self.operator, self.value)
        } else {
            write!(f, "{} {} {}", self.field, self.operator, self.value)
        }
    }
}

/// Join semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    /// Parses a join keyword (case-insensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("INNER") {
            Some(JoinKind::Inner)
        } else if keyword.eq_ignore_ascii_case("LEFT") {
            Some(JoinKind::Left)
        } else if keyword.eq_ignore_ascii_case("RIGHT") {
            Some(JoinKind::Right)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
        }
    }
}

/// Equality join condition `left = right`, both `table.field`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinCondition {
    pub left: String,
    pub right: String,
}

impl JoinCondition {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Table part of the left operand
    pub fn left_table(&self) -> &str {
        split_qualified(&self.left).0
    }

    /// Field part of the left operand
    pub fn left_field(&self) -> &str {
        split_qualified(&self.left).1
    }

    /// Table part of the right operand
    pub fn right_table(&self) -> &str {
        split_qualified(&self.right).0
    }

    /// Field part of the right operand
    pub fn right_field(&self) -> &str {
        split_qualified(&self.right).1
    }

    /// Returns true if both operands are two-part dotted identifiers
    pub fn is_qualified(&self) -> bool {
        is_two_part(&self.left) && is_two_part(&self.right)
    }
}

/// Splits `table.field` at the first dot. An unqualified name has an empty table part.
pub fn split_qualified(name: &str) -> (&str, &str) {
    match name.split_once('.') {
        Some((table, field)) => (table, field),
        None => ("", name),
    }
}

fn is_two_part(name: &str) -> bool {
    let mut parts = name.split('.');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(t), Some(f), None) if !t.is_empty() && !f.is_empty()
    )
}

/// JOIN clause: kind, joined table and condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub table: String,
    pub condition: JoinCondition,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderByField {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderByField {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Structured query request produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    /// Projected fields as written (may be `*` or dotted)
    pub fields: Vec<String>,
    /// Main table name
    pub table: String,
    /// Filter conditions (always combined with AND)
    pub where_clauses: Vec<Condition>,
    /// Optional join
    pub join: Option<JoinSpec>,
    /// GROUP BY fields, captured but not applied
    pub group_by_fields: Option<Vec<String>>,
    /// ORDER BY fields
    pub order_by_fields: Option<Vec<OrderByField>>,
    /// An aggregate call appears without GROUP BY
    pub has_ungrouped_aggregate: bool,
}

impl QueryRequest {
    /// Creates a request selecting `fields` from `table`
    pub fn new(
        fields: impl IntoIterator<Item = impl Into<String>>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            table: table.into(),
            where_clauses: Vec::new(),
            join: None,
            group_by_fields: None,
            order_by_fields: None,
            has_ungrouped_aggregate: false,
        }
    }

    /// Adds a condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.where_clauses.push(condition);
        self
    }

    /// Sets the join
    pub fn with_join(mut self, join: JoinSpec) -> Self {
        self.join = Some(join);
        self
    }

    /// Returns true if a join was requested
    pub fn has_join(&self) -> bool {
        self.join.is_some()
    }

    /// Fields referenced by WHERE and ORDER BY that are not projected.
    ///
    /// Order of first appearance, no duplicates.
    pub fn auxiliary_fields(&self) -> Vec<String> {
        let mut extra: Vec<String> = Vec::new();
        let referenced = self
            .where_clauses
            .iter()
            .map(|c| c.field.as_str())
            .chain(
                self.order_by_fields
                    .iter()
                    .flatten()
                    .map(|o| o.field.as_str()),
            );
        for field in referenced {
            if !self.fields.iter().any(|f| f == field) && !extra.iter().any(|f| f == field) {
                extra.push(field.to_string());
            }
        }
        extra
    }
}

impl fmt::Display for QueryRequest {
    /// Renders canonical query text that parses back to an equal request.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.fields.join(", "), self.table)?;

        if let Some(join) = &self.join {
            write!(
                f,
                " {} JOIN {} ON {} = {}",
                join.kind.as_str(),
                join.table,
                join.condition.left,
                join.condition.right
            )?;
        }

        if !self.where_clauses.is_empty() {
            let conditions: Vec<String> =
                self.where_clauses.iter().map(|c| c.to_string()).collect();
            write!(f, " WHERE {}", conditions.join(" AND "))?;
        }

        if let Some(group_by) = &self.group_by_fields {
            write!(f, " GROUP BY {}", group_by.join(", "))?;
        }

        if let Some(order_by) = &self.order_by_fields {
            let entries: Vec<String> = order_by
                .iter()
                .map(|o| format!("{} {}", o.field, o.direction.as_str()))
                .collect();
            write!(f, " ORDER BY {}", entries.join(", "))?;
        }

        Ok(())
    }
}
