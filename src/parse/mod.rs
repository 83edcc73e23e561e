//! Parsing of JSON text into documents.
//!
//! Two interchangeable strategies implement [`JsonParse`]:
//!
//! - [`ScanningParser`] - single pass over a character cursor, never
//!   materializing substrings for skipped content. The default; scales to
//!   large documents.
//! - [`SubstringParser`] - splits each container body into top-level
//!   substrings and parses them recursively. Simpler, allocation-heavy;
//!   acceptable for small inputs.
//!
//! Both strategies produce identical trees for the same well-formed input
//! and share the same lenient literal table: `yes`/`no` beside
//! `true`/`false`, `nil` beside `null`, and the non-standard numeric
//! keywords `nan`, `inf`, `+inf`, `infinity`, `-inf`, `-infinity`
//! (case-insensitive). Unquoted numeric object keys are accepted. These
//! extensions exist on input only; serialization never re-emits them.

mod reader;
mod scanning;
mod substring;

pub use scanning::ScanningParser;
pub use substring::SubstringParser;

use crate::error::ParseError;
use crate::value::{JsonNumber, JsonValue};

/// A parsing strategy: JSON text in, document out.
pub trait JsonParse {
    /// Parse `text` into a document, failing with a descriptive
    /// [`ParseError`] on malformed or truncated input.
    fn parse(&self, text: &str) -> Result<JsonValue, ParseError>;
}

/// Append the character named by the escape `\X` to `out`.
///
/// The known sequences are the exact inverse of the serializer's escape
/// pass plus `\\`; anything else keeps the backslash literally so that a
/// serialize/parse round trip is stable.
pub(crate) fn push_unescaped(out: &mut String, escaped: char) {
    match escaped {
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        '\'' => out.push('\''),
        '"' => out.push('"'),
        '\\' => out.push('\\'),
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}

/// Resolve backslash escapes in a raw quoted-string body.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => push_unescaped(&mut out, next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Match a bare word against the accepted keyword table.
pub(crate) fn keyword_value(word: &str) -> Option<JsonValue> {
    match word.to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(JsonValue::Boolean(true)),
        "false" | "no" => Some(JsonValue::Boolean(false)),
        "null" | "nil" => Some(JsonValue::Null),
        "nan" => Some(JsonValue::Number(JsonNumber::Float(f64::NAN))),
        "inf" | "+inf" | "infinity" | "+infinity" => {
            Some(JsonValue::Number(JsonNumber::Float(f64::INFINITY)))
        }
        "-inf" | "-infinity" => Some(JsonValue::Number(JsonNumber::Float(f64::NEG_INFINITY))),
        _ => None,
    }
}

/// Parse a numeric literal span. Integral if no decimal point was seen,
/// floating otherwise; an integral span that overflows `i64` (or carries an
/// exponent) falls back to floating before failing.
pub(crate) fn number_literal(text: &str) -> Result<JsonNumber, ParseError> {
    if text.contains('.') {
        return text
            .parse::<f64>()
            .map(JsonNumber::Float)
            .map_err(|_| ParseError::MalformedLiteral(text.to_string()));
    }
    match text.parse::<i64>() {
        Ok(n) => Ok(JsonNumber::Integer(n)),
        Err(_) => text
            .parse::<f64>()
            .map(JsonNumber::Float)
            .map_err(|_| ParseError::MalformedLiteral(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_known_sequences() {
        assert_eq!(unescape(r#"a\nb"#), "a\nb");
        assert_eq!(unescape(r#"a\rb"#), "a\rb");
        assert_eq!(unescape(r#"a\"b"#), "a\"b");
        assert_eq!(unescape(r#"a\'b"#), "a'b");
        assert_eq!(unescape(r#"a\\b"#), "a\\b");
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape(r#"a\tb"#), "a\\tb");
        assert_eq!(unescape("a\\u0041b"), "a\\u0041b");
    }

    #[test]
    fn test_keyword_table_is_case_insensitive() {
        assert_eq!(keyword_value("TRUE"), Some(JsonValue::Boolean(true)));
        assert_eq!(keyword_value("No"), Some(JsonValue::Boolean(false)));
        assert_eq!(keyword_value("NIL"), Some(JsonValue::Null));
        assert_eq!(keyword_value("banana"), None);
    }

    #[test]
    fn test_number_literal_keeps_most_specific_representation() {
        assert_eq!(number_literal("42"), Ok(JsonNumber::Integer(42)));
        assert_eq!(number_literal("-7"), Ok(JsonNumber::Integer(-7)));
        assert_eq!(number_literal("2.5"), Ok(JsonNumber::Float(2.5)));
        assert_eq!(number_literal("1e3"), Ok(JsonNumber::Float(1000.0)));
        assert!(number_literal("--").is_err());
    }
}
