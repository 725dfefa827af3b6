//! SELECT and JOIN sub-clause parsing

use super::ast::{JoinCondition, JoinKind, JoinSpec};
use super::errors::{ParseError, ParseResult};
use super::scanner::{find_first_of, split_once_keyword, strip_leading_keyword};

const JOIN_KEYWORDS: &[&[&str]] = &[
    &["INNER", "JOIN"],
    &["LEFT", "JOIN"],
    &["RIGHT", "JOIN"],
];

/// Projection, source table and optional join parsed from the leading fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectClause {
    pub fields: Vec<String>,
    pub table: String,
    pub join: Option<JoinSpec>,
}

/// Parses `SELECT <fields> FROM <table> [(INNER|LEFT|RIGHT) JOIN ...]`.
pub fn parse_select_clause(fragment: &str) -> ParseResult<SelectClause> {
    let (select_part, join) = match find_first_of(fragment, JOIN_KEYWORDS) {
        Some((_, m)) => {
            let keyword = fragment[m.start..m.end]
                .split_whitespace()
                .next()
                .unwrap_or_default();
            let kind = JoinKind::from_keyword(keyword).ok_or_else(|| {
                ParseError::invalid_join(format!("Unknown join keyword: '{}'", keyword))
            })?;
            let join = parse_join_clause(kind, &fragment[m.end..])?;
            (fragment[..m.start].trim(), Some(join))
        }
        None => (fragment.trim(), None),
    };

    let body = strip_leading_keyword(select_part, "SELECT")
        .ok_or_else(|| ParseError::invalid_select(select_part))?;

    // Leading whitespace is kept so FROM stays whitespace-bounded
    let (fields, table) = split_once_keyword(body, &["FROM"])
        .ok_or_else(|| ParseError::invalid_select(select_part))?;

    if fields.is_empty() || table.is_empty() {
        return Err(ParseError::invalid_select(select_part));
    }

    let fields = fields
        .split(',')
        .map(|f| {
            let f = f.trim();
            if f.is_empty() {
                Err(ParseError::invalid_select(select_part))
            } else {
                Ok(f.to_string())
            }
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(SelectClause {
        fields,
        table: table.to_string(),
        join,
    })
}

/// Parses `<table> ON <left> = <right>` following a join keyword.
fn parse_join_clause(kind: JoinKind, text: &str) -> ParseResult<JoinSpec> {
    let text = format!(" {}", text.trim());
    let (table, condition) = split_once_keyword(&text, &["ON"]).ok_or_else(|| {
        ParseError::invalid_join(format!(
            "{} JOIN is missing an ON condition: '{}'",
            kind.as_str(),
            text.trim()
        ))
    })?;

    let malformed = || {
        ParseError::invalid_join(format!(
            "Invalid {} JOIN condition: '{}'",
            kind.as_str(),
            condition
        ))
    };

    let (left, right) = condition.split_once('=').ok_or_else(malformed)?;
    let (left, right) = (left.trim(), right.trim());

    if table.is_empty() || !is_identifier(left) || !is_identifier(right) {
        return Err(malformed());
    }

    Ok(JoinSpec {
        kind,
        table: table.to_string(),
        condition: JoinCondition::new(left, right),
    })
}

/// Word characters and dots only.
fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}
