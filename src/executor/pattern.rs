//! SQL LIKE pattern matching
//!
//! - `%` matches any sequence of characters, including none
//! - `_` matches exactly one character
//! - everything else matches itself, case-sensitively

/// Returns true if `text` matches the LIKE `pattern`.
pub(crate) fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Pattern position after the last `%`, and the text position it is retried from
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('%') => {
                p += 1;
                backtrack = Some((p, t));
            }
            Some('_') => {
                p += 1;
                t += 1;
            }
            Some(c) if *c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((after_wildcard, from)) => {
                    p = after_wildcard;
                    t = from + 1;
                    backtrack = Some((after_wildcard, from + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        assert!(like_match("John", "John"));
        assert!(!like_match("John", "john"));
        assert!(!like_match("John", "Joh"));
    }

    #[test]
    fn test_percent() {
        assert!(like_match("Jane Doe", "%Jane%"));
        assert!(like_match("Jane", "%Jane%"));
        assert!(like_match("Mathematics", "Math%"));
        assert!(like_match("", "%"));
        assert!(!like_match("Physics", "Math%"));
        assert!(like_match("abcabc", "%abc"));
        assert!(like_match("aXbYc", "a%b%c"));
    }

    #[test]
    fn test_underscore() {
        assert!(like_match("cat", "c_t"));
        assert!(!like_match("cart", "c_t"));
        assert!(like_match("héllo", "h_llo"));
    }

    #[test]
    fn test_trailing_text_must_match() {
        assert!(!like_match("abcd", "%bc"));
        assert!(!like_match("", "_"));
    }
}
