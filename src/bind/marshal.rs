//! Typed object to document conversion.

use super::field::{Bindable, FieldValue};
use super::FieldKind;
use crate::error::BindingError;
use crate::ser::date_text;
use crate::value::{JsonNumber, JsonType, JsonValue};

/// Marshal a bindable object into an object document.
///
/// Absent fields emit an explicit Null child. Sequence fields recurse
/// element by element (sequences of sequences included); nested bindables
/// and string-keyed maps recurse into sub-documents; a String-classified
/// field whose payload is some other scalar is stringified.
pub fn marshal<T: Bindable>(object: &T) -> Result<JsonValue, BindingError> {
    let mut doc = JsonValue::new(JsonType::Object)?;
    for binding in T::bindings() {
        let child = match (binding.get)(object)? {
            None => JsonValue::Null,
            Some(payload) => convert(
                &payload,
                binding.effective_type(),
                &binding.kind,
                binding.key,
            )?,
        };
        doc.insert(binding.key, child)?;
    }
    Ok(doc)
}

fn convert(
    payload: &FieldValue,
    classification: JsonType,
    kind: &FieldKind,
    field: &str,
) -> Result<JsonValue, BindingError> {
    match classification {
        JsonType::Raw => match payload {
            FieldValue::Doc(doc) => Ok(doc.clone()),
            _ => Err(wrong(field, "a raw document")),
        },
        JsonType::Object => match (payload, kind) {
            (FieldValue::Entries(entries), FieldKind::Map(value_kind)) => {
                let mut doc = JsonValue::new(JsonType::Object)?;
                for (key, value) in entries {
                    let child = convert(value, value_kind.classify(), value_kind, field)?;
                    doc.insert(key.clone(), child)?;
                }
                Ok(doc)
            }
            // a nested bindable arrives pre-marshalled by its accessor
            (FieldValue::Doc(doc), _) => Ok(doc.clone()),
            _ => Err(wrong(field, "an object-shaped payload")),
        },
        JsonType::Array => match (payload, kind) {
            (FieldValue::Seq(items), FieldKind::Seq(element_kind)) => {
                let mut doc = JsonValue::new(JsonType::Array)?;
                for item in items {
                    doc.push(convert(item, element_kind.classify(), element_kind, field)?)?;
                }
                Ok(doc)
            }
            _ => Err(wrong(field, "a sequence payload")),
        },
        JsonType::String => match payload {
            FieldValue::Text(s) => Ok(JsonValue::String(s.clone())),
            FieldValue::I8(n) => Ok(JsonValue::String(n.to_string())),
            FieldValue::I16(n) => Ok(JsonValue::String(n.to_string())),
            FieldValue::I32(n) => Ok(JsonValue::String(n.to_string())),
            FieldValue::I64(n) => Ok(JsonValue::String(n.to_string())),
            FieldValue::F32(x) => Ok(JsonValue::String(x.to_string())),
            FieldValue::F64(x) => Ok(JsonValue::String(x.to_string())),
            FieldValue::Flag(b) => Ok(JsonValue::String(b.to_string())),
            FieldValue::Stamp(stamp) => Ok(JsonValue::String(date_text(*stamp))),
            FieldValue::Seq(_) | FieldValue::Entries(_) | FieldValue::Doc(_) => {
                Err(wrong(field, "a stringifiable payload"))
            }
        },
        JsonType::Number => match payload {
            FieldValue::I8(n) => Ok(integer(*n as i64)),
            FieldValue::I16(n) => Ok(integer(*n as i64)),
            FieldValue::I32(n) => Ok(integer(*n as i64)),
            FieldValue::I64(n) => Ok(integer(*n)),
            FieldValue::F32(x) => Ok(float(*x as f64)),
            FieldValue::F64(x) => Ok(float(*x)),
            _ => Err(wrong(field, "a numeric payload")),
        },
        JsonType::Boolean => match payload {
            FieldValue::Flag(b) => Ok(JsonValue::Boolean(*b)),
            _ => Err(wrong(field, "a boolean payload")),
        },
        JsonType::Date => match payload {
            FieldValue::Stamp(stamp) => Ok(JsonValue::Date(*stamp)),
            _ => Err(wrong(field, "a timestamp payload")),
        },
        JsonType::Null => Ok(JsonValue::Null),
        // `Any` is resolved before dispatch; reaching it means the
        // configuration asked for inference of an uninferable shape
        JsonType::Any => Err(wrong(field, "an inferable payload")),
    }
}

fn integer(n: i64) -> JsonValue {
    JsonValue::Number(JsonNumber::Integer(n))
}

fn float(x: f64) -> JsonValue {
    JsonValue::Number(JsonNumber::Float(x))
}

fn wrong(field: &str, expected: &'static str) -> BindingError {
    BindingError::WrongPayload {
        field: field.to_string(),
        expected,
    }
}
