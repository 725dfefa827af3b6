//! WHERE fragment parsing
//!
//! Splits on AND/OR and turns each piece into one [`Condition`]. The
//! connectives are not kept: every condition is later combined with AND.

use super::ast::{Condition, Operator};
use super::errors::{ParseError, ParseResult};
use super::scanner::{find_keyword, split_on_keywords, toggles_quote};

const CONNECTIVES: &[&[&str]] = &[&["AND"], &["OR"]];
const LIKE: &[&str] = &["LIKE"];

/// Parses a WHERE fragment into its conditions, in written order.
pub fn parse_where_clause(fragment: &str) -> ParseResult<Vec<Condition>> {
    split_on_keywords(fragment, CONNECTIVES)
        .into_iter()
        .map(parse_condition)
        .collect()
}

/// Parses one atomic condition.
///
/// LIKE must be followed by whitespace; a trailing `like` is an ordinary
/// value, as in `note = like`.
pub fn parse_condition(text: &str) -> ParseResult<Condition> {
    let text = text.trim();
    if let Some(m) = find_keyword(text, LIKE, 0).filter(|m| m.end < text.len()) {
        let field = text[..m.start].trim();
        let pattern = text[m.end..].trim();
        if field.is_empty() {
            return Err(ParseError::invalid_where(text));
        }
        return Ok(Condition::new(field, Operator::Like, strip_quotes(pattern)));
    }

    let (pos, operator) = find_operator(text).ok_or_else(|| ParseError::invalid_where(text))?;
    let field = text[..pos].trim();
    let value = text[pos + operator.as_str().len()..].trim();

    if field.is_empty() || value.is_empty() {
        return Err(ParseError::invalid_where(text));
    }

    Ok(Condition::new(field, operator, strip_quotes(value)))
}

/// Finds the leftmost comparison operator, outside quotes.
fn find_operator(text: &str) -> Option<(usize, Operator)> {
    let bytes = text.as_bytes();
    let mut in_quote = false;

    for (pos, _) in text.char_indices() {
        if toggles_quote(bytes, pos, in_quote) {
            in_quote = !in_quote;
            continue;
        }
        if in_quote {
            continue;
        }
        let rest = &text[pos..];
        if let Some(op) = Operator::COMPARISONS
            .iter()
            .find(|op| rest.starts_with(op.as_str()))
        {
            return Some((pos, *op));
        }
    }

    None
}

/// Removes one pair of surrounding single quotes.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}
