//! Per-field configuration records consumed by the binder.

use time::OffsetDateTime;

use crate::error::BindingError;
use crate::value::{JsonType, JsonValue};

/// Numeric subtype of a bound field. Unmarshal narrows or widens a parsed
/// number to this subtype; a 32-bit field truncates a wider value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

/// Declared native shape of a bound field.
///
/// Container shapes carry their element descriptor explicitly, because the
/// element type cannot be recovered from an erased payload at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A numeric field of the given subtype.
    Number(NumberKind),
    /// A string field.
    Text,
    /// A boolean field.
    Flag,
    /// A timestamp field.
    Stamp,
    /// An ordered collection; the box describes the element shape.
    Seq(Box<FieldKind>),
    /// A string-keyed map; the box describes the value shape.
    Map(Box<FieldKind>),
    /// Another bindable type, marshalled recursively by the accessors.
    Nested,
    /// A document fragment stored as-is.
    Raw,
}

impl FieldKind {
    /// Infer the document classification for this shape.
    pub fn classify(&self) -> JsonType {
        match self {
            FieldKind::Number(_) => JsonType::Number,
            FieldKind::Text => JsonType::String,
            FieldKind::Flag => JsonType::Boolean,
            FieldKind::Stamp => JsonType::Date,
            FieldKind::Seq(_) => JsonType::Array,
            FieldKind::Map(_) | FieldKind::Nested => JsonType::Object,
            FieldKind::Raw => JsonType::Raw,
        }
    }
}

/// A field payload crossing the binder boundary, carrying the most
/// specific native representation of the field's value. This is what the
/// mechanical accessors trade in; all interpretation happens in the
/// binder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `i8` payload.
    I8(i8),
    /// `i16` payload.
    I16(i16),
    /// `i32` payload.
    I32(i32),
    /// `i64` payload.
    I64(i64),
    /// `f32` payload.
    F32(f32),
    /// `f64` payload.
    F64(f64),
    /// String payload.
    Text(String),
    /// Boolean payload.
    Flag(bool),
    /// Timestamp payload.
    Stamp(OffsetDateTime),
    /// Ordered collection payload.
    Seq(Vec<FieldValue>),
    /// String-keyed map payload, in iteration order.
    Entries(Vec<(String, FieldValue)>),
    /// An already-marshalled sub-document (nested bindable or raw field).
    Doc(JsonValue),
}

/// Reads a field's payload from the object; `None` means the field is
/// absent.
pub type Getter<T> = fn(&T) -> Result<Option<FieldValue>, BindingError>;

/// Stores a payload into a field; `None` clears the field.
pub type Setter<T> = fn(&mut T, Option<FieldValue>) -> Result<(), BindingError>;

/// Per-field configuration: key, classification, declared shape, and the
/// two mechanical accessors. Resolved once per bind operation.
pub struct FieldBinding<T> {
    /// JSON key the field maps to.
    pub key: &'static str,
    /// Declared classification; `Any` defers to the shape.
    pub declared: JsonType,
    /// Declared native shape, including container element descriptors.
    pub kind: FieldKind,
    /// Lift the field out of the object.
    pub get: Getter<T>,
    /// Store a payload into the object.
    pub set: Setter<T>,
}

impl<T> FieldBinding<T> {
    /// Automatic-binding form: classification inferred from the shape, key
    /// equal to the field name.
    pub fn auto(key: &'static str, kind: FieldKind, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            key,
            declared: JsonType::Any,
            kind,
            get,
            set,
        }
    }

    /// Explicit form: a declared classification and key override.
    pub fn classified(
        declared: JsonType,
        key: &'static str,
        kind: FieldKind,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        Self {
            declared,
            key,
            kind,
            get,
            set,
        }
    }

    /// The classification the binder dispatches on: the declared one, or
    /// the inferred one when the declaration is `Any`.
    pub(crate) fn effective_type(&self) -> JsonType {
        if self.declared == JsonType::Any {
            self.kind.classify()
        } else {
            self.declared
        }
    }
}

/// An application type eligible for marshal and unmarshal.
pub trait Bindable: Sized {
    /// The per-field configuration for this type.
    fn bindings() -> Vec<FieldBinding<Self>>;

    /// The zero-argument constructor unmarshal populates.
    fn construct() -> Self;
}
