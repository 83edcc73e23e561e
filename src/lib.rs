//! feather-json - a self-contained JSON document engine.
//!
//! A typed in-memory document model, a hand-written parser with two
//! interchangeable strategies, a serializer with sequential and fork-join
//! strategies, and a generic binder that converts between documents and
//! statically-typed application objects using per-field configuration.
//!
//! # Architecture
//!
//! The engine is organized into focused modules, leaf to root:
//!
//! - [`value`] - the document model: [`JsonValue`] and its variants
//! - [`builder`] - fluent construction of documents
//! - [`parse`] - text to document, scanning and substring strategies
//! - [`ser`] - document to text, recursive and fork-join strategies
//! - [`bind`] - typed objects to and from documents
//! - [`error`] - the recoverable error taxonomy
//!
//! The parser is deliberately lenient: it accepts `yes`/`no`, `nil`,
//! `nan`/`inf` spellings and unquoted numeric keys on input, while
//! serialization only ever emits standard `true`/`false`/`null` and
//! decimal numeric text.
//!
//! # Example
//!
//! ```
//! use feather_json::{parse, serialize};
//!
//! let doc = parse(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
//! assert_eq!(doc.get("a").unwrap().and_then(|v| v.as_i64()), Some(1));
//! assert_eq!(serialize(&doc), r#"{"a":1,"b":[1,2,3]}"#);
//! ```

// Library code must avoid unwrap/expect/panic; every fallible path returns
// a typed error. Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod bind;
pub mod builder;
pub mod error;
pub mod parse;
pub mod ser;
pub mod value;

// Re-export commonly used types
pub use bind::{
    marshal, unmarshal, Bindable, FieldBinding, FieldKind, FieldValue, NumberKind, Unmarshaller,
};
pub use builder::{ArrayBuilder, ObjectBuilder};
pub use error::{BindingError, JsonError, JsonResult, ParseError, StructuralError};
pub use parse::{JsonParse, ScanningParser, SubstringParser};
pub use ser::{ForkJoinSerializer, JsonSerialize, RecursiveSerializer};
pub use value::{JsonNumber, JsonType, JsonValue};

/// Parse JSON text with the default scanning strategy.
pub fn parse(text: &str) -> Result<JsonValue, ParseError> {
    ScanningParser.parse(text)
}

/// Parse JSON text with an explicit strategy.
pub fn parse_with<P: JsonParse>(parser: &P, text: &str) -> Result<JsonValue, ParseError> {
    parser.parse(text)
}

/// Serialize a document with the default sequential strategy.
pub fn serialize(value: &JsonValue) -> String {
    RecursiveSerializer.serialize(value)
}

/// Serialize a document with an explicit strategy.
pub fn serialize_with<S: JsonSerialize>(serializer: &S, value: &JsonValue) -> String {
    serializer.serialize(value)
}

/// Marshal a bindable object and serialize it in one step.
pub fn to_json<T: Bindable>(object: &T) -> JsonResult<String> {
    let doc = marshal(object)?;
    Ok(serialize(&doc))
}

/// Parse JSON text and unmarshal it into a bindable type in one step.
pub fn from_json<T: Bindable>(text: &str) -> JsonResult<T> {
    let doc = parse(text)?;
    Ok(unmarshal(&doc)?)
}

/// Best-effort form of [`to_json`]: an empty string on any failure.
pub fn to_json_lossy<T: Bindable>(object: &T) -> String {
    to_json(object).unwrap_or_default()
}

/// Best-effort form of [`from_json`]: `None` on any failure.
pub fn from_json_lossy<T: Bindable>(text: &str) -> Option<T> {
    from_json(text).ok()
}
