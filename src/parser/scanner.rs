//! Keyword scanner shared by the clause parsers
//!
//! Keywords are matched ASCII case-insensitively, must be bounded by
//! whitespace, and are never matched inside single-quoted literals.
//! A quote opens a literal only at the start of a token, so an
//! apostrophe inside a bare word such as `O'Brien` is plain text.
//! Multi-word phrases such as `ORDER BY` accept any whitespace run
//! between their words.

/// Byte span of a matched keyword phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    /// Offset of the first keyword character
    pub start: usize,
    /// Offset just past the last keyword character
    pub end: usize,
}

/// Finds the first whitespace-bounded occurrence of `phrase` at or after `from`.
///
/// The phrase must be preceded by whitespace and followed by whitespace
/// or end of text.
pub fn find_keyword(text: &str, phrase: &[&str], from: usize) -> Option<KeywordMatch> {
    let bytes = text.as_bytes();
    let mut in_quote = false;

    for i in 0..bytes.len() {
        if toggles_quote(bytes, i, in_quote) {
            in_quote = !in_quote;
            continue;
        }
        if in_quote || i < from || i == 0 || !bytes[i - 1].is_ascii_whitespace() {
            continue;
        }
        if let Some(end) = match_phrase_at(bytes, i, phrase) {
            return Some(KeywordMatch { start: i, end });
        }
    }

    None
}

/// Finds the earliest match among several phrases.
///
/// Returns the index of the matching phrase with its span. When two
/// phrases match at the same offset the first listed wins.
pub fn find_first_of(text: &str, phrases: &[&[&str]]) -> Option<(usize, KeywordMatch)> {
    phrases
        .iter()
        .enumerate()
        .filter_map(|(idx, phrase)| find_keyword(text, phrase, 0).map(|m| (idx, m)))
        .min_by_key(|(idx, m)| (m.start, *idx))
}

/// Splits `text` around the first occurrence of `phrase`.
///
/// Both halves are trimmed.
pub fn split_once_keyword<'a>(text: &'a str, phrase: &[&str]) -> Option<(&'a str, &'a str)> {
    find_keyword(text, phrase, 0).map(|m| (text[..m.start].trim(), text[m.end..].trim()))
}

/// Splits `text` on every occurrence of any of `phrases`, discarding the separators.
pub fn split_on_keywords<'a>(text: &'a str, phrases: &[&[&str]]) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some((_, m)) = find_first_of(rest, phrases) {
        pieces.push(rest[..m.start].trim());
        rest = &rest[m.end..];
    }
    pieces.push(rest.trim());

    pieces
}

/// Strips a leading keyword followed by whitespace, returning the remainder.
pub fn strip_leading_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let bytes = text.as_bytes();
    let len = keyword.len();

    if bytes.len() <= len
        || !bytes[..len].eq_ignore_ascii_case(keyword.as_bytes())
        || !bytes[len].is_ascii_whitespace()
    {
        return None;
    }

    Some(&text[len..])
}

/// Returns true if the byte at `i` opens or closes a quoted literal.
///
/// Inside a literal any quote closes it. Outside, a quote opens one only
/// at the start of the text or after whitespace, an operator or `(`/`,`.
pub fn toggles_quote(bytes: &[u8], i: usize, in_quote: bool) -> bool {
    if bytes[i] != b'\'' {
        return false;
    }
    in_quote
        || i == 0
        || bytes[i - 1].is_ascii_whitespace()
        || matches!(bytes[i - 1], b'=' | b'<' | b'>' | b'!' | b'(' | b',')
}

/// Matches each word of `phrase` starting at `pos`, returning the end offset.
fn match_phrase_at(bytes: &[u8], mut pos: usize, phrase: &[&str]) -> Option<usize> {
    for (n, word) in phrase.iter().enumerate() {
        if n > 0 {
            let ws_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos == ws_start {
                return None;
            }
        }

        let end = pos + word.len();
        if end > bytes.len() || !bytes[pos..end].eq_ignore_ascii_case(word.as_bytes()) {
            return None;
        }
        pos = end;
    }

    if pos == bytes.len() || bytes[pos].is_ascii_whitespace() {
        Some(pos)
    } else {
        None
    }
}
