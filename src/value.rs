//! Core document model.
//!
//! [`JsonValue`] is a closed tagged union over the JSON variants plus a
//! serialization-only timestamp variant. Values are built by the
//! [builder](crate::builder), by the [parser](crate::parse), or by the
//! [binder](crate::bind), and are immutable by convention once handed to a
//! serializer. Every object and array exclusively owns its children; shared
//! or cyclic graphs are not representable.
//!
//! Object storage is an [`IndexMap`], so key order is insertion order and is
//! preserved through parse/serialize round trips. The public contract only
//! promises a stable order, not any particular one; callers must not rely on
//! alphabetical ordering.

use std::fmt;

use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::error::StructuralError;

/// Variant tag of a [`JsonValue`].
///
/// `Any` and `Raw` never appear in stored data: `Any` asks the binder to
/// infer the concrete variant from the target type, and `Raw` asks it to
/// pass a sub-document through unconverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    /// String-keyed collection of values.
    Object,
    /// Ordered sequence of values.
    Array,
    /// Text value.
    String,
    /// Integral or floating numeric value.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Timestamp; produced by builders and the binder, never by parsing.
    Date,
    /// Explicit null.
    Null,
    /// Binder directive: infer the variant from the target type.
    Any,
    /// Binder directive: pass the sub-document through unconverted.
    Raw,
}

impl JsonType {
    /// Lower-case tag name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Date => "date",
            JsonType::Null => "null",
            JsonType::Any => "any",
            JsonType::Raw => "raw",
        }
    }
}

/// Numeric payload of a [`JsonValue::Number`].
///
/// The most specific representation the value was built with is kept:
/// literals without a decimal point parse as `Integer`, everything else as
/// `Float`. The two are not equal to each other even for the same
/// mathematical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    /// Whole number, stored as `i64`.
    Integer(i64),
    /// Floating-point number, stored as `f64`.
    Float(f64),
}

impl JsonNumber {
    /// Value as `i64`; floats truncate toward zero.
    pub fn as_i64(self) -> i64 {
        match self {
            JsonNumber::Integer(n) => n,
            JsonNumber::Float(f) => f as i64,
        }
    }

    /// Value as `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            JsonNumber::Integer(n) => n as f64,
            JsonNumber::Float(f) => f,
        }
    }

    /// True for the `Integer` representation.
    pub fn is_integer(self) -> bool {
        matches!(self, JsonNumber::Integer(_))
    }
}

impl fmt::Display for JsonNumber {
    /// Natural textual form: integers plain, floats always with a decimal
    /// point (`2.0`, not `2`) unless the shortest form already carries one
    /// or an exponent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Integer(n) => write!(f, "{n}"),
            JsonNumber::Float(x) => {
                let text = x.to_string();
                if x.is_finite() && !text.contains('.') && !text.contains('e') {
                    write!(f, "{text}.0")
                } else {
                    write!(f, "{text}")
                }
            }
        }
    }
}

/// A JSON document or sub-document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// String-keyed, insertion-ordered collection of child values.
    Object(IndexMap<String, JsonValue>),
    /// Ordered sequence of child values.
    Array(Vec<JsonValue>),
    /// Text value.
    String(String),
    /// Numeric value.
    Number(JsonNumber),
    /// Boolean value.
    Boolean(bool),
    /// Timestamp value (serialization-only).
    Date(OffsetDateTime),
    /// Null value.
    #[default]
    Null,
}

impl JsonValue {
    /// Create an empty value of the given type.
    ///
    /// The binder directives `Any` and `Raw` have no stored representation
    /// and are rejected with [`StructuralError::NoStorage`].
    pub fn new(json_type: JsonType) -> Result<JsonValue, StructuralError> {
        match json_type {
            JsonType::Object => Ok(JsonValue::Object(IndexMap::new())),
            JsonType::Array => Ok(JsonValue::Array(Vec::new())),
            JsonType::String => Ok(JsonValue::String(String::new())),
            JsonType::Number => Ok(JsonValue::Number(JsonNumber::Integer(0))),
            JsonType::Boolean => Ok(JsonValue::Boolean(false)),
            JsonType::Date => Ok(JsonValue::Date(OffsetDateTime::UNIX_EPOCH)),
            JsonType::Null => Ok(JsonValue::Null),
            JsonType::Any | JsonType::Raw => Err(StructuralError::NoStorage(json_type)),
        }
    }

    /// Variant tag of this value.
    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Object(_) => JsonType::Object,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Date(_) => JsonType::Date,
            JsonValue::Null => JsonType::Null,
        }
    }

    /// Lower-case tag name for error messages.
    pub fn type_name(&self) -> &'static str {
        self.json_type().name()
    }

    /// Returns true if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a boolean.
    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    /// Returns true if this is a date.
    pub fn is_date(&self) -> bool {
        matches!(self, JsonValue::Date(_))
    }

    /// Returns true if this is null.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Numeric payload, if this is a Number.
    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer payload, if this is a Number (floats truncate).
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().map(JsonNumber::as_i64)
    }

    /// Floating payload, if this is a Number.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(JsonNumber::as_f64)
    }

    /// String payload, if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean payload, if this is a Boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Timestamp payload, if this is a Date.
    pub fn as_date(&self) -> Option<OffsetDateTime> {
        match self {
            JsonValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Child values, if this is an Array.
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Child map, if this is an Object.
    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Look up a child of an Object by key.
    ///
    /// A missing key is `Ok(None)`; calling this on a non-object is a
    /// [`StructuralError`].
    pub fn get(&self, key: &str) -> Result<Option<&JsonValue>, StructuralError> {
        match self {
            JsonValue::Object(map) => Ok(map.get(key)),
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Object,
                actual: other.json_type(),
            }),
        }
    }

    /// Look up a child of an Array by index.
    ///
    /// An out-of-range index is `Ok(None)`; calling this on a non-array is a
    /// [`StructuralError`].
    pub fn get_index(&self, index: usize) -> Result<Option<&JsonValue>, StructuralError> {
        match self {
            JsonValue::Array(items) => Ok(items.get(index)),
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Array,
                actual: other.json_type(),
            }),
        }
    }

    /// Append a child to an Array.
    pub fn push(&mut self, value: JsonValue) -> Result<(), StructuralError> {
        match self {
            JsonValue::Array(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Array,
                actual: other.json_type(),
            }),
        }
    }

    /// Associate a child with a key in an Object. Re-inserting an existing
    /// key overwrites the previous child.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: JsonValue,
    ) -> Result<(), StructuralError> {
        match self {
            JsonValue::Object(map) => {
                map.insert(key.into(), value);
                Ok(())
            }
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Object,
                actual: other.json_type(),
            }),
        }
    }

    /// Number of children of an Object or Array.
    pub fn size(&self) -> Result<usize, StructuralError> {
        match self {
            JsonValue::Object(map) => Ok(map.len()),
            JsonValue::Array(items) => Ok(items.len()),
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Array,
                actual: other.json_type(),
            }),
        }
    }

    /// Children of an Array, as a slice.
    pub fn elements(&self) -> Result<&[JsonValue], StructuralError> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Array,
                actual: other.json_type(),
            }),
        }
    }

    /// Children of an Object, as the underlying insertion-ordered map.
    pub fn entries(&self) -> Result<&IndexMap<String, JsonValue>, StructuralError> {
        match self {
            JsonValue::Object(map) => Ok(map),
            other => Err(StructuralError::WrongVariant {
                expected: JsonType::Object,
                actual: other.json_type(),
            }),
        }
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(JsonNumber::Integer(n))
    }
}

impl From<i32> for JsonValue {
    fn from(n: i32) -> Self {
        JsonValue::Number(JsonNumber::Integer(n as i64))
    }
}

impl From<f64> for JsonValue {
    fn from(x: f64) -> Self {
        JsonValue::Number(JsonNumber::Float(x))
    }
}

impl From<f32> for JsonValue {
    fn from(x: f32) -> Self {
        JsonValue::Number(JsonNumber::Float(x as f64))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

impl From<OffsetDateTime> for JsonValue {
    fn from(d: OffsetDateTime) -> Self {
        JsonValue::Date(d)
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(n: JsonNumber) -> Self {
        JsonValue::Number(n)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}
