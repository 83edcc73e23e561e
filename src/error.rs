//! Error types for the document engine.
//!
//! Three failure families exist, one per subsystem boundary: [`ParseError`]
//! for text that cannot be read into a document, [`StructuralError`] for
//! document operations applied to a non-matching variant, and
//! [`BindingError`] for conversions between documents and application types.
//! All are recoverable and returned to the immediate caller; nothing here is
//! fatal to the process. [`JsonError`] is the umbrella type returned by the
//! crate-level convenience entry points.

use std::error::Error;
use std::fmt;

use crate::value::JsonType;

/// Result alias for operations that can fail with any engine error.
pub type JsonResult<T> = Result<T, JsonError>;

/// Failure while parsing JSON text into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended before the current value was complete.
    UnexpectedEof,
    /// A closing `}` or `]` appeared where a value was expected.
    UnexpectedClosing(char),
    /// A literal token could not be read as a number, keyword or string.
    MalformedLiteral(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "unexpected end of input"),
            ParseError::UnexpectedClosing(c) => {
                write!(f, "unexpected closing symbol '{c}'")
            }
            ParseError::MalformedLiteral(lit) => {
                write!(f, "malformed literal '{lit}'")
            }
        }
    }
}

impl Error for ParseError {}

/// Failure of a document operation applied to the wrong variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// An array or object operation was attempted on another variant.
    WrongVariant {
        /// Variant the operation requires.
        expected: JsonType,
        /// Variant the value actually holds.
        actual: JsonType,
    },
    /// A value of the requested type cannot carry storage at all
    /// (the binder-directive tags have no stored representation).
    NoStorage(JsonType),
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralError::WrongVariant { expected, actual } => write!(
                f,
                "operation requires {} but found {}",
                expected.name(),
                actual.name()
            ),
            StructuralError::NoStorage(t) => {
                write!(f, "{} is a binder directive and has no storage", t.name())
            }
        }
    }
}

impl Error for StructuralError {}

/// Failure while marshalling or unmarshalling an application type.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    /// Unmarshal was asked to populate a type from a non-object document.
    NotAnObject(JsonType),
    /// A field's payload did not match its declared classification.
    WrongPayload {
        /// JSON key of the offending field.
        field: String,
        /// What the classification required.
        expected: &'static str,
    },
    /// A map field carried a key that is not a string.
    NonStringKey {
        /// JSON key of the offending field.
        field: String,
    },
    /// A collection-of-collections field was requested on unmarshal.
    NestedCollection {
        /// JSON key of the offending field.
        field: String,
    },
    /// A lenient fallback coercion failed while strict mode was active.
    Coercion {
        /// JSON key of the offending field.
        field: String,
        /// Description of the payload that failed to coerce.
        detail: String,
    },
    /// A document operation failed while assembling or walking a document.
    Structure(StructuralError),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::NotAnObject(t) => {
                write!(f, "binding target is {}, not an object", t.name())
            }
            BindingError::WrongPayload { field, expected } => {
                write!(f, "field '{field}': payload is not {expected}")
            }
            BindingError::NonStringKey { field } => {
                write!(f, "map field '{field}' must have string keys")
            }
            BindingError::NestedCollection { field } => {
                write!(
                    f,
                    "field '{field}': collections of collections are not supported"
                )
            }
            BindingError::Coercion { field, detail } => {
                write!(f, "field '{field}': cannot coerce {detail}")
            }
            BindingError::Structure(e) => write!(f, "document structure: {e}"),
        }
    }
}

impl Error for BindingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BindingError::Structure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StructuralError> for BindingError {
    fn from(e: StructuralError) -> Self {
        BindingError::Structure(e)
    }
}

/// Umbrella error for the crate-level entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonError {
    /// Text could not be parsed into a document.
    Parse(ParseError),
    /// A document operation was applied to the wrong variant.
    Structure(StructuralError),
    /// A marshal or unmarshal step failed.
    Binding(BindingError),
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Parse(e) => write!(f, "parse error: {e}"),
            JsonError::Structure(e) => write!(f, "structural error: {e}"),
            JsonError::Binding(e) => write!(f, "binding error: {e}"),
        }
    }
}

impl Error for JsonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JsonError::Parse(e) => Some(e),
            JsonError::Structure(e) => Some(e),
            JsonError::Binding(e) => Some(e),
        }
    }
}

impl From<ParseError> for JsonError {
    fn from(e: ParseError) -> Self {
        JsonError::Parse(e)
    }
}

impl From<StructuralError> for JsonError {
    fn from(e: StructuralError) -> Self {
        JsonError::Structure(e)
    }
}

impl From<BindingError> for JsonError {
    fn from(e: BindingError) -> Self {
        JsonError::Binding(e)
    }
}
