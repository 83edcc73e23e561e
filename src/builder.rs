//! Fluent construction of documents.
//!
//! [`ObjectBuilder`] and [`ArrayBuilder`] accumulate children and
//! materialize a [`JsonValue`] on an explicit [`build`](ObjectBuilder::build)
//! call. Scalar variants are built through the `From` impls on `JsonValue`;
//! [`auto`] lifts any such native value, which makes nested builders
//! composable because both builder types convert into `JsonValue`
//! themselves.
//!
//! Object keys keep insertion order, matching parsed documents.

use indexmap::IndexMap;

use crate::value::JsonValue;

/// Accumulates `key: value` pairs for an object document.
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    entries: IndexMap<String, JsonValue>,
}

impl ObjectBuilder {
    /// Start an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child under `key`. Re-using a key overwrites.
    pub fn append(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Materialize the accumulated object.
    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.entries)
    }
}

impl From<ObjectBuilder> for JsonValue {
    fn from(b: ObjectBuilder) -> Self {
        b.build()
    }
}

/// Accumulates elements for an array document.
#[derive(Debug, Default)]
pub struct ArrayBuilder {
    elements: Vec<JsonValue>,
}

impl ArrayBuilder {
    /// Start an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element.
    pub fn append(mut self, value: impl Into<JsonValue>) -> Self {
        self.elements.push(value.into());
        self
    }

    /// Materialize the accumulated array.
    pub fn build(self) -> JsonValue {
        JsonValue::Array(self.elements)
    }
}

impl From<ArrayBuilder> for JsonValue {
    fn from(b: ArrayBuilder) -> Self {
        b.build()
    }
}

/// Wrap a native value in the matching document variant.
pub fn auto(value: impl Into<JsonValue>) -> JsonValue {
    value.into()
}

/// The null document value.
pub fn null() -> JsonValue {
    JsonValue::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsonNumber;

    #[test]
    fn test_object_builder_accumulates_in_order() {
        let doc = ObjectBuilder::new()
            .append("name", "device-7")
            .append("port", 8080i64)
            .append("active", true)
            .build();
        let keys: Vec<&String> = doc.entries().unwrap().keys().collect();
        assert_eq!(keys, ["name", "port", "active"]);
        assert_eq!(doc.get("port").unwrap().and_then(JsonValue::as_i64), Some(8080));
    }

    #[test]
    fn test_array_builder_keeps_element_order() {
        let doc = ArrayBuilder::new().append(1i64).append(2i64).append(3i64).build();
        let elements = doc.elements().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[2].as_i64(), Some(3));
    }

    #[test]
    fn test_builders_nest_through_into() {
        let doc = ObjectBuilder::new()
            .append("items", ArrayBuilder::new().append("a").append("b"))
            .append("meta", ObjectBuilder::new().append("count", 2i64))
            .build();
        assert!(doc.get("items").unwrap().is_some_and(JsonValue::is_array));
        assert!(doc.get("meta").unwrap().is_some_and(JsonValue::is_object));
    }

    #[test]
    fn test_auto_infers_the_variant() {
        assert!(auto("text").is_string());
        assert!(auto(12i64).is_number());
        assert!(auto(false).is_boolean());
        assert_eq!(auto(2.5).as_number(), Some(JsonNumber::Float(2.5)));
        assert!(null().is_null());
    }
}
