//! Clause extraction
//!
//! Strips, in fixed order, the ORDER BY suffix, then the GROUP BY suffix,
//! then splits on WHERE. Whatever remains is the SELECT(+JOIN) fragment.

use super::ast::{OrderByField, SortDirection};
use super::errors::{ParseError, ParseResult};
use super::scanner::find_keyword;

const ORDER_BY: &[&str] = &["ORDER", "BY"];
const GROUP_BY: &[&str] = &["GROUP", "BY"];
const WHERE: &[&str] = &["WHERE"];

/// Query text split into its clauses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClauses<'a> {
    /// `SELECT ... FROM ... [JOIN ...]`
    pub select_fragment: &'a str,
    /// Everything after WHERE, if present
    pub where_fragment: Option<&'a str>,
    pub group_by_fields: Option<Vec<String>>,
    pub order_by_fields: Option<Vec<OrderByField>>,
}

/// Splits query text into SELECT, WHERE, GROUP BY and ORDER BY parts.
pub fn extract_clauses(query: &str) -> ParseResult<ExtractedClauses<'_>> {
    let mut rest = query.trim();

    let mut order_by_fields = None;
    if let Some(m) = find_keyword(rest, ORDER_BY, 0) {
        order_by_fields = Some(parse_order_by(&rest[m.end..])?);
        rest = rest[..m.start].trim_end();
    }

    let mut group_by_fields = None;
    if let Some(m) = find_keyword(rest, GROUP_BY, 0) {
        group_by_fields = Some(parse_group_by(&rest[m.end..])?);
        rest = rest[..m.start].trim_end();
    }

    let mut where_fragment = None;
    if let Some(m) = find_keyword(rest, WHERE, 0) {
        let fragment = rest[m.end..].trim();
        if fragment.is_empty() {
            return Err(ParseError::invalid_where(""));
        }
        where_fragment = Some(fragment);
        rest = rest[..m.start].trim_end();
    }

    Ok(ExtractedClauses {
        select_fragment: rest,
        where_fragment,
        group_by_fields,
        order_by_fields,
    })
}

fn parse_group_by(list: &str) -> ParseResult<Vec<String>> {
    list.split(',')
        .map(|field| {
            let field = field.trim();
            if field.is_empty() {
                Err(ParseError::invalid_group_by(format!(
                    "Empty field in GROUP BY list: '{}'",
                    list.trim()
                )))
            } else {
                Ok(field.to_string())
            }
        })
        .collect()
}

fn parse_order_by(list: &str) -> ParseResult<Vec<OrderByField>> {
    list.split(',')
        .map(|entry| {
            let mut parts = entry.split_whitespace();
            let field = parts.next().ok_or_else(|| {
                ParseError::invalid_order_by(format!(
                    "Empty field in ORDER BY list: '{}'",
                    list.trim()
                ))
            })?;

            let direction = match parts.next() {
                None => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("ASC") => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("DESC") => SortDirection::Desc,
                Some(d) => {
                    return Err(ParseError::invalid_order_by(format!(
                        "Invalid sort direction '{}' for field '{}'",
                        d, field
                    )))
                }
            };

            if let Some(extra) = parts.next() {
                return Err(ParseError::invalid_order_by(format!(
                    "Unexpected token '{}' in ORDER BY entry '{}'",
                    extra,
                    entry.trim()
                )));
            }

            Ok(OrderByField {
                field: field.to_string(),
                direction,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ParseErrorCode;

    #[test]
    fn test_select_only() {
        let clauses = extract_clauses("  SELECT id, name FROM student  ").unwrap();
        assert_eq!(clauses.select_fragment, "SELECT id, name FROM student");
        assert!(clauses.where_fragment.is_none());
        assert!(clauses.group_by_fields.is_none());
        assert!(clauses.order_by_fields.is_none());
    }

    #[test]
    fn test_all_clauses() {
        let clauses = extract_clauses(
            "SELECT name FROM student WHERE age > 20 GROUP BY name, age ORDER BY name desc, age",
        )
        .unwrap();

        assert_eq!(clauses.select_fragment, "SELECT name FROM student");
        assert_eq!(clauses.where_fragment, Some("age > 20"));
        assert_eq!(
            clauses.group_by_fields,
            Some(vec!["name".to_string(), "age".to_string()])
        );
        assert_eq!(
            clauses.order_by_fields,
            Some(vec![OrderByField::desc("name"), OrderByField::asc("age")])
        );
    }

    #[test]
    fn test_where_inside_order_by_is_not_a_boundary() {
        let clauses = extract_clauses("SELECT a FROM t ORDER BY where").unwrap();
        assert_eq!(clauses.select_fragment, "SELECT a FROM t");
        assert!(clauses.where_fragment.is_none());
        assert_eq!(
            clauses.order_by_fields,
            Some(vec![OrderByField::asc("where")])
        );
    }

    #[test]
    fn test_where_split_first_occurrence_only() {
        let clauses = extract_clauses("SELECT a FROM t WHERE b = 1 WHERE c = 2").unwrap();
        assert_eq!(clauses.where_fragment, Some("b = 1 WHERE c = 2"));
    }

    #[test]
    fn test_invalid_direction() {
        let err = extract_clauses("SELECT a FROM t ORDER BY a sideways").unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::InvalidOrderBy);
    }

    #[test]
    fn test_empty_group_by_entry() {
        let err = extract_clauses("SELECT a FROM t GROUP BY a,,b").unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::InvalidGroupBy);
    }

    #[test]
    fn test_dangling_where() {
        let err = extract_clauses("SELECT a FROM t WHERE").unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::InvalidWhere);
    }
}
