//! Document to typed object conversion.

use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use super::field::{Bindable, FieldValue};
use super::{FieldKind, NumberKind};
use crate::error::BindingError;
use crate::value::{JsonNumber, JsonType, JsonValue};

/// Unmarshal with the default lenient coercion policy.
///
/// Shorthand for [`Unmarshaller::new`] followed by
/// [`unmarshal`](Unmarshaller::unmarshal).
pub fn unmarshal<T: Bindable>(value: &JsonValue) -> Result<T, BindingError> {
    Unmarshaller::new().unmarshal(value)
}

/// Populates bindable objects from object documents.
///
/// The lenient fallbacks accept a String payload where a Number, Boolean
/// or Date was declared. In the default mode a fallback that fails to
/// coerce leaves the field unset and emits a `tracing` warning; in strict
/// mode the same condition is a [`BindingError::Coercion`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmarshaller {
    strict: bool,
}

impl Unmarshaller {
    /// Lenient unmarshaller: failed fallback coercions are logged and the
    /// field is left unset.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Strict unmarshaller: failed fallback coercions are errors.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Construct a `T` and populate its fields from `value`, which must be
    /// an object document.
    ///
    /// A missing or explicitly Null child clears the field and moves on.
    pub fn unmarshal<T: Bindable>(&self, value: &JsonValue) -> Result<T, BindingError> {
        let entries = value
            .as_object()
            .ok_or(BindingError::NotAnObject(value.json_type()))?;
        let mut target = T::construct();
        for binding in T::bindings() {
            match entries.get(binding.key) {
                None | Some(JsonValue::Null) => (binding.set)(&mut target, None)?,
                Some(child) => {
                    let payload = self.convert(
                        child,
                        binding.effective_type(),
                        &binding.kind,
                        binding.key,
                    )?;
                    (binding.set)(&mut target, payload)?;
                }
            }
        }
        Ok(target)
    }

    fn convert(
        &self,
        child: &JsonValue,
        classification: JsonType,
        kind: &FieldKind,
        field: &str,
    ) -> Result<Option<FieldValue>, BindingError> {
        if child.is_null() {
            return Ok(None);
        }
        match classification {
            JsonType::Raw => Ok(Some(FieldValue::Doc(child.clone()))),
            JsonType::Object => match kind {
                FieldKind::Map(value_kind) => {
                    let map = child
                        .as_object()
                        .ok_or_else(|| wrong(field, "an object document"))?;
                    let mut entries = Vec::with_capacity(map.len());
                    for (key, value) in map {
                        if let Some(converted) =
                            self.convert(value, value_kind.classify(), value_kind, field)?
                        {
                            entries.push((key.clone(), converted));
                        }
                    }
                    Ok(Some(FieldValue::Entries(entries)))
                }
                FieldKind::Nested | FieldKind::Raw => Ok(Some(FieldValue::Doc(child.clone()))),
                _ => Err(wrong(field, "an object-shaped field")),
            },
            JsonType::Array => match kind {
                FieldKind::Seq(element_kind) => {
                    if matches!(**element_kind, FieldKind::Seq(_)) {
                        return Err(BindingError::NestedCollection {
                            field: field.to_string(),
                        });
                    }
                    let items = child
                        .as_array()
                        .ok_or_else(|| wrong(field, "an array document"))?;
                    let mut seq = Vec::with_capacity(items.len());
                    for item in items {
                        if let Some(converted) =
                            self.convert(item, element_kind.classify(), element_kind, field)?
                        {
                            seq.push(converted);
                        }
                    }
                    Ok(Some(FieldValue::Seq(seq)))
                }
                _ => Err(wrong(field, "a sequence-shaped field")),
            },
            JsonType::String => match child {
                JsonValue::String(s) => Ok(Some(FieldValue::Text(s.clone()))),
                // a parsed number satisfies a string field through its text
                JsonValue::Number(n) => Ok(Some(FieldValue::Text(n.to_string()))),
                other => self.coercion_failure(
                    field,
                    format!("{} payload into a string", other.type_name()),
                ),
            },
            JsonType::Number => {
                let FieldKind::Number(number_kind) = kind else {
                    return Err(wrong(field, "a numeric field"));
                };
                match child {
                    JsonValue::Number(n) => Ok(Some(narrow(*n, *number_kind))),
                    JsonValue::String(s) => self.number_from_text(s, *number_kind, field),
                    other => self.coercion_failure(
                        field,
                        format!("{} payload into a number", other.type_name()),
                    ),
                }
            }
            JsonType::Boolean => match child {
                JsonValue::Boolean(b) => Ok(Some(FieldValue::Flag(*b))),
                JsonValue::String(s) => match flag_from_text(s) {
                    Some(b) => Ok(Some(FieldValue::Flag(b))),
                    None => {
                        self.coercion_failure(field, format!("string '{s}' into a boolean"))
                    }
                },
                other => self.coercion_failure(
                    field,
                    format!("{} payload into a boolean", other.type_name()),
                ),
            },
            JsonType::Date => match child {
                JsonValue::Date(stamp) => Ok(Some(FieldValue::Stamp(*stamp))),
                JsonValue::String(s) => match stamp_from_text(s) {
                    Some(stamp) => Ok(Some(FieldValue::Stamp(stamp))),
                    None => {
                        self.coercion_failure(field, format!("string '{s}' into a timestamp"))
                    }
                },
                other => self.coercion_failure(
                    field,
                    format!("{} payload into a timestamp", other.type_name()),
                ),
            },
            JsonType::Null => Ok(None),
            JsonType::Any => Err(wrong(field, "an inferable field")),
        }
    }

    /// Lenient fallback: a string payload where a number was declared. A
    /// decimal separator selects the floating representation, mirroring
    /// the parser's literal classification.
    fn number_from_text(
        &self,
        text: &str,
        kind: NumberKind,
        field: &str,
    ) -> Result<Option<FieldValue>, BindingError> {
        let parsed = if text.contains('.') || text.contains(',') {
            text.parse::<f64>().ok().map(JsonNumber::Float)
        } else {
            text.parse::<i64>().ok().map(JsonNumber::Integer)
        };
        match parsed {
            Some(number) => Ok(Some(narrow(number, kind))),
            None => self.coercion_failure(field, format!("string '{text}' into a number")),
        }
    }

    fn coercion_failure(
        &self,
        field: &str,
        detail: String,
    ) -> Result<Option<FieldValue>, BindingError> {
        if self.strict {
            return Err(BindingError::Coercion {
                field: field.to_string(),
                detail,
            });
        }
        tracing::warn!(
            field = %field,
            detail = %detail,
            "lenient coercion failed; leaving field unset"
        );
        Ok(None)
    }
}

/// Narrow or widen a parsed number to the field's declared subtype.
fn narrow(number: JsonNumber, kind: NumberKind) -> FieldValue {
    match kind {
        NumberKind::I8 => FieldValue::I8(number.as_i64() as i8),
        NumberKind::I16 => FieldValue::I16(number.as_i64() as i16),
        NumberKind::I32 => FieldValue::I32(number.as_i64() as i32),
        NumberKind::I64 => FieldValue::I64(number.as_i64()),
        NumberKind::F32 => FieldValue::F32(number.as_f64() as f32),
        NumberKind::F64 => FieldValue::F64(number.as_f64()),
    }
}

/// Lenient boolean literals, shared with the parser's keyword table.
fn flag_from_text(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parse the fixed-pattern timestamp the serializer emits.
fn stamp_from_text(text: &str) -> Option<OffsetDateTime> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    PrimitiveDateTime::parse(text, &format)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

fn wrong(field: &str, expected: &'static str) -> BindingError {
    BindingError::WrongPayload {
        field: field.to_string(),
        expected,
    }
}
