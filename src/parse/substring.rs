//! Substring-recursive parser.
//!
//! Trims the input, short-circuits the `{}`/`[]` literals, and otherwise
//! dispatches on the first significant character. Container bodies are
//! split into top-level field/element substrings by a three-state scan
//! (inside-quote, brace depth, bracket depth) so that commas and closing
//! symbols inside nested or quoted content do not end the current span;
//! each span is then parsed recursively. Trades extra allocation for
//! simplicity and degrades on large or deeply nested documents, where every
//! nesting level re-materializes its substrings.

use indexmap::IndexMap;

use super::{keyword_value, number_literal, unescape, JsonParse};
use crate::error::ParseError;
use crate::value::JsonValue;

/// The allocation-heavy but simple parsing strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringParser;

impl JsonParse for SubstringParser {
    fn parse(&self, text: &str) -> Result<JsonValue, ParseError> {
        let trimmed = text.trim();
        match trimmed {
            "{}" | "{ }" => return Ok(JsonValue::Object(IndexMap::new())),
            "[]" | "[ ]" => return Ok(JsonValue::Array(Vec::new())),
            _ => {}
        }
        match trimmed.chars().next() {
            None => Err(ParseError::UnexpectedEof),
            Some('{') => self.parse_object(trimmed),
            Some('[') => self.parse_array(trimmed),
            Some('"') => Ok(parse_string_literal(trimmed)),
            Some(c @ ('}' | ']')) => Err(ParseError::UnexpectedClosing(c)),
            Some(_) => parse_scalar(trimmed),
        }
    }
}

impl SubstringParser {
    fn parse_object(&self, text: &str) -> Result<JsonValue, ParseError> {
        let body = strip_delimiters(text, '{', '}');
        let mut entries = IndexMap::new();
        for span in split_top_level(body) {
            let Some(colon) = span.find(':') else {
                return Err(ParseError::MalformedLiteral(span));
            };
            let key = object_key(span[..colon].trim());
            let value = self.parse(span[colon + 1..].trim())?;
            entries.insert(key, value);
        }
        Ok(JsonValue::Object(entries))
    }

    fn parse_array(&self, text: &str) -> Result<JsonValue, ParseError> {
        let body = strip_delimiters(text, '[', ']');
        let mut elements = Vec::new();
        for span in split_top_level(body) {
            elements.push(self.parse(span.trim())?);
        }
        Ok(JsonValue::Array(elements))
    }
}

/// Remove the container delimiters from the beginning and end of the span,
/// each only if present.
fn strip_delimiters(text: &str, open: char, close: char) -> &str {
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text)
}

/// Split a container body at its top-level commas. The three pieces of
/// state track quoted content and both nesting depths simultaneously; the
/// quote flag only toggles on an unescaped `"`, and depths only move while
/// outside a string.
fn split_top_level(body: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut brace_depth = 0i32;
    let mut bracket_depth = 0i32;
    let mut previous = '\0';

    for c in body.chars() {
        if c == ',' && !in_quote && brace_depth == 0 && bracket_depth == 0 {
            spans.push(std::mem::take(&mut current));
            previous = c;
            continue;
        }
        current.push(c);
        if c == '"' && previous != '\\' {
            in_quote = !in_quote;
        }
        if !in_quote {
            match c {
                '{' => brace_depth += 1,
                '}' => brace_depth -= 1,
                '[' => bracket_depth += 1,
                ']' => bracket_depth -= 1,
                _ => {}
            }
        }
        previous = c;
    }
    if !current.trim().is_empty() {
        spans.push(current);
    }
    spans
}

/// An object key: quoted keys lose their quotes and resolve escapes,
/// unquoted (numeric) keys are taken verbatim.
fn object_key(raw: &str) -> String {
    let stripped = raw.strip_prefix('"').unwrap_or(raw);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
    unescape(stripped)
}

fn parse_string_literal(text: &str) -> JsonValue {
    let body = strip_delimiters(text, '"', '"');
    JsonValue::String(unescape(body))
}

/// A bare scalar: keyword, then number, then - for purely alphabetic
/// words - a bare string.
fn parse_scalar(text: &str) -> Result<JsonValue, ParseError> {
    if let Some(value) = keyword_value(text) {
        return Ok(value);
    }
    match number_literal(text) {
        Ok(number) => Ok(JsonValue::Number(number)),
        Err(_) if text.chars().all(char::is_alphabetic) => Ok(JsonValue::from(text)),
        Err(e) => Err(e),
    }
}
