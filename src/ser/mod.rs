//! Serialization of documents into JSON text.
//!
//! Two interchangeable strategies implement [`JsonSerialize`] and produce
//! byte-identical output for the same tree:
//!
//! - [`RecursiveSerializer`] - plain single-threaded recursion. Purely a
//!   function of its input; safe to call concurrently on different
//!   documents.
//! - [`ForkJoinSerializer`] - renders container children as concurrent
//!   tasks and joins them in original child order, which keeps the output
//!   deterministic under nondeterministic scheduling. Worth it on large or
//!   deep documents; scheduling overhead dominates on small ones.
//!
//! Rendering is total: a document is always serializable, so neither
//! strategy has a failure mode.
//!
//! Output format notes: exactly four characters are escaped in strings
//! (newline, carriage return, single quote, double quote); a literal
//! backslash passes through unescaped. This matches the historical wire
//! format and is kept for compatibility rather than full JSON conformance.
//! Timestamps render with the fixed pattern `yyyy-MM-ddTHH:mm:ssZ` where
//! the trailing `Z` is a literal character, not a UTC-offset designator.

mod forkjoin;
mod recursive;

pub use forkjoin::ForkJoinSerializer;
pub use recursive::RecursiveSerializer;

use time::OffsetDateTime;

use crate::value::{JsonNumber, JsonValue};

/// A serialization strategy: document in, JSON text out. Total.
pub trait JsonSerialize {
    /// Render `value` as JSON text.
    fn serialize(&self, value: &JsonValue) -> String;
}

/// Append `text` to `out`, escaping the four historical characters.
pub(crate) fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
}

/// Decimal text for a number. Integers render bare; floats always carry a
/// decimal point; non-finite floats have no decimal form and render `null`
/// (the lenient `nan`/`inf` spellings are accepted on input only).
pub(crate) fn number_text(number: JsonNumber) -> String {
    match number {
        JsonNumber::Integer(n) => n.to_string(),
        JsonNumber::Float(x) if !x.is_finite() => "null".to_string(),
        JsonNumber::Float(_) => number.to_string(),
    }
}

/// Unquoted fixed-pattern timestamp text with a literal trailing `Z`.
pub(crate) fn date_text(stamp: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        stamp.year(),
        u8::from(stamp.month()),
        stamp.day(),
        stamp.hour(),
        stamp.minute(),
        stamp.second()
    )
}

/// Render a leaf (non-container) value.
pub(crate) fn leaf_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('"');
            escape_into(s, &mut out);
            out.push('"');
            out
        }
        JsonValue::Number(n) => number_text(*n),
        JsonValue::Boolean(true) => "true".to_string(),
        JsonValue::Boolean(false) => "false".to_string(),
        JsonValue::Date(stamp) => format!("\"{}\"", date_text(*stamp)),
        JsonValue::Null => "null".to_string(),
        // containers are handled by the strategies themselves
        JsonValue::Object(_) | JsonValue::Array(_) => String::new(),
    }
}
