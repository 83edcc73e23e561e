//! Single-pass scanning parser.
//!
//! Operates over a [`Reader`] cursor and classifies each significant
//! character into one of: object-open, array-open, quote, number-start,
//! letter, or closing-symbol. A closing symbol found where a value was
//! expected is not a hard failure: it is reported to the enclosing
//! container as a distinguishable [`Scanned::Closing`] result so that empty
//! containers and container ends fall out of the same value loop. Only at
//! the top level does it become a parse error.

use indexmap::IndexMap;

use super::reader::Reader;
use super::{keyword_value, number_literal, push_unescaped, JsonParse};
use crate::error::ParseError;
use crate::value::{JsonNumber, JsonValue};

/// The default parsing strategy: one pass, no intermediate substrings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanningParser;

impl JsonParse for ScanningParser {
    fn parse(&self, text: &str) -> Result<JsonValue, ParseError> {
        let mut reader = Reader::new(text);
        match scan_value(&mut reader)? {
            Scanned::Value(value) => Ok(value),
            Scanned::Closing(symbol) => Err(ParseError::UnexpectedClosing(symbol)),
        }
    }
}

/// Outcome of scanning at a position where a value may start.
enum Scanned {
    Value(JsonValue),
    /// A `}` or `]` stood where the value was expected; the enclosing
    /// container interprets this as its own end.
    Closing(char),
}

#[derive(Clone, Copy, PartialEq)]
enum CharClass {
    ObjectOpen,
    ArrayOpen,
    Quote,
    NumberStart,
    Letter,
    Closing,
    Insignificant,
}

fn classify(c: char) -> CharClass {
    match c {
        '{' => CharClass::ObjectOpen,
        '[' => CharClass::ArrayOpen,
        '"' => CharClass::Quote,
        '-' => CharClass::NumberStart,
        '}' | ']' => CharClass::Closing,
        c if c.is_ascii_digit() => CharClass::NumberStart,
        c if c.is_alphabetic() => CharClass::Letter,
        _ => CharClass::Insignificant,
    }
}

fn scan_value(reader: &mut Reader) -> Result<Scanned, ParseError> {
    let mut class = CharClass::Insignificant;
    reader.skip_while(|c| {
        class = classify(c);
        class == CharClass::Insignificant
    });

    match class {
        CharClass::ObjectOpen => scan_object(reader).map(Scanned::Value),
        CharClass::ArrayOpen => scan_array(reader).map(Scanned::Value),
        CharClass::Quote => scan_string(reader).map(Scanned::Value),
        CharClass::NumberStart => scan_number(reader).map(Scanned::Value),
        CharClass::Letter => scan_keyword(reader).map(Scanned::Value),
        CharClass::Closing => Ok(Scanned::Closing(reader.read_one()?)),
        CharClass::Insignificant => Err(ParseError::UnexpectedEof),
    }
}

fn scan_object(reader: &mut Reader) -> Result<JsonValue, ParseError> {
    let mut entries = IndexMap::new();
    let _ = reader.read_one()?; // '{'
    loop {
        // next key starts at a quote or a digit; '}' ends the object
        reader.skip_while(|c| c != '"' && !c.is_ascii_digit() && c != '}');
        let c = reader.read_one()?;
        if c == '}' {
            break;
        }
        let key = if c == '"' {
            read_string_body(reader)?
        } else {
            reader.step_back();
            reader.read_while(|c| c.is_ascii_digit() || c == '.')
        };
        reader.skip_past(':')?;
        match scan_value(reader)? {
            Scanned::Value(value) => {
                entries.insert(key, value);
            }
            Scanned::Closing(_) => break,
        }
        reader.skip_while(|c| c != ',' && c != '}');
        if reader.read_one()? == '}' {
            break;
        }
    }
    Ok(JsonValue::Object(entries))
}

fn scan_array(reader: &mut Reader) -> Result<JsonValue, ParseError> {
    let mut elements = Vec::new();
    let _ = reader.read_one()?; // '['
    loop {
        match scan_value(reader)? {
            Scanned::Value(value) => elements.push(value),
            Scanned::Closing(_) => break,
        }
        reader.skip_while(|c| c != ',' && c != ']');
        if reader.read_one()? == ']' {
            break;
        }
    }
    Ok(JsonValue::Array(elements))
}

fn scan_string(reader: &mut Reader) -> Result<JsonValue, ParseError> {
    let _ = reader.read_one()?; // opening quote
    read_string_body(reader).map(JsonValue::String)
}

/// Read a quoted string's content after the opening quote, resolving
/// escapes. A backslash suppresses the terminating significance of the
/// character that follows it.
fn read_string_body(reader: &mut Reader) -> Result<String, ParseError> {
    let mut out = String::new();
    loop {
        match reader.read_one()? {
            '"' => return Ok(out),
            '\\' => {
                let escaped = reader.read_one()?;
                push_unescaped(&mut out, escaped);
            }
            c => out.push(c),
        }
    }
}

fn scan_number(reader: &mut Reader) -> Result<JsonValue, ParseError> {
    let span = reader.read_while(|c| c.is_ascii_digit() || c == '-' || c == '.' || c == 'e');
    if span == "-" {
        // a lone minus introduces the negative keyword forms
        let word = reader.read_while(char::is_alphabetic);
        return match word.to_ascii_lowercase().as_str() {
            "inf" | "infinity" => Ok(JsonValue::Number(JsonNumber::Float(f64::NEG_INFINITY))),
            "nan" => Ok(JsonValue::Number(JsonNumber::Float(f64::NAN))),
            _ => Err(ParseError::MalformedLiteral(format!("-{word}"))),
        };
    }
    number_literal(&span).map(JsonValue::Number)
}

fn scan_keyword(reader: &mut Reader) -> Result<JsonValue, ParseError> {
    let word = reader.read_while(char::is_alphabetic);
    Ok(keyword_value(&word).unwrap_or(JsonValue::String(word)))
}
