//! Interpretation of the free-text count query.
//!
//! The query is a plain search term. It is never executed as SQL: backends
//! receive it as a bound parameter or match it in memory.

use super::ServiceError;

/// Longest accepted query, in characters.
pub const MAX_QUERY_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountQuery {
    /// Count every testimonial.
    All,
    /// Count testimonials whose message, name or title contains the term
    /// (case-insensitive). The term is stored lowercased.
    Contains(String),
}

impl CountQuery {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let term = raw.trim();
        if term.chars().count() > MAX_QUERY_LEN {
            return Err(ServiceError::InvalidQuery(format!(
                "query must be at most {MAX_QUERY_LEN} characters"
            )));
        }
        if term.chars().any(char::is_control) {
            return Err(ServiceError::InvalidQuery(
                "query must not contain control characters".to_string(),
            ));
        }
        // Lossy percent-decoding turns invalid UTF-8 into U+FFFD.
        if term.contains(char::REPLACEMENT_CHARACTER) {
            return Err(ServiceError::InvalidQuery(
                "query must be valid UTF-8 text".to_string(),
            ));
        }
        if term.is_empty() {
            Ok(Self::All)
        } else {
            Ok(Self::Contains(term.to_lowercase()))
        }
    }

    /// `ILIKE` pattern for the term, with `%`, `_` and `\` escaped.
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Contains(term) => {
                let mut pattern = String::with_capacity(term.len() + 2);
                pattern.push('%');
                for c in term.chars() {
                    if matches!(c, '%' | '_' | '\\') {
                        pattern.push('\\');
                    }
                    pattern.push(c);
                }
                pattern.push('%');
                Some(pattern)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_counts_everything() {
        assert_eq!(CountQuery::parse("").unwrap(), CountQuery::All);
        assert_eq!(CountQuery::parse("   ").unwrap(), CountQuery::All);
    }

    #[test]
    fn term_is_trimmed_and_lowercased() {
        assert_eq!(
            CountQuery::parse("  Great ").unwrap(),
            CountQuery::Contains("great".to_string())
        );
    }

    #[test]
    fn sql_looking_text_is_just_a_term() {
        let q = CountQuery::parse("select count(*) from testimonial; drop table x").unwrap();
        assert_eq!(
            q,
            CountQuery::Contains("select count(*) from testimonial; drop table x".to_string())
        );
    }

    #[test]
    fn overlong_query_is_rejected() {
        let raw = "a".repeat(MAX_QUERY_LEN + 1);
        assert!(matches!(CountQuery::parse(&raw), Err(ServiceError::InvalidQuery(_))));
        assert!(CountQuery::parse(&"a".repeat(MAX_QUERY_LEN)).is_ok());
    }

    #[test]
    fn replacement_character_is_rejected() {
        assert!(matches!(
            CountQuery::parse("caf\u{FFFD}"),
            Err(ServiceError::InvalidQuery(_))
        ));
        assert!(CountQuery::parse("café").is_ok());
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(matches!(
            CountQuery::parse("foo\u{0}bar"),
            Err(ServiceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(CountQuery::All.like_pattern(), None);
        let q = CountQuery::parse("100%_off\\").unwrap();
        assert_eq!(q.like_pattern().as_deref(), Some("%100\\%\\_off\\\\%"));
    }
}
