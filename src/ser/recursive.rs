//! Sequential recursive serializer.

use super::{escape_into, leaf_text, JsonSerialize};
use crate::value::JsonValue;

/// The default serialization strategy. Stack depth is bounded by document
/// nesting depth; no shared state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveSerializer;

impl JsonSerialize for RecursiveSerializer {
    fn serialize(&self, value: &JsonValue) -> String {
        let mut out = String::new();
        render_value(value, &mut out);
        out
    }
}

fn render_value(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Object(entries) => {
            out.push('{');
            for (i, (key, child)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                escape_into(key, out);
                out.push_str("\":");
                render_value(child, out);
            }
            out.push('}');
        }
        JsonValue::Array(elements) => {
            out.push('[');
            for (i, child) in elements.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render_value(child, out);
            }
            out.push(']');
        }
        leaf => out.push_str(&leaf_text(leaf)),
    }
}
