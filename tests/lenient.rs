//! Lenient input extensions.
//!
//! The parser accepts several non-standard literals on input; serialization
//! never re-emits them. Both parsing strategies share the same table, and
//! the binder reuses the boolean literals as an unmarshal fallback.

use feather_json::{
    parse, serialize, Bindable, BindingError, FieldBinding, FieldKind, FieldValue, JsonParse,
    JsonValue, NumberKind, ScanningParser, SubstringParser, Unmarshaller,
};
use test_case::test_case;

fn both(input: &str) -> (JsonValue, JsonValue) {
    (
        ScanningParser.parse(input).unwrap(),
        SubstringParser.parse(input).unwrap(),
    )
}

// ============================================================================
// Boolean and null keywords
// ============================================================================

#[test_case("yes", true ; "yes lower")]
#[test_case("YES", true ; "yes upper")]
#[test_case("Yes", true ; "yes title")]
#[test_case("true", true ; "true lower")]
#[test_case("TRUE", true ; "true upper")]
#[test_case("no", false ; "no lower")]
#[test_case("NO", false ; "no upper")]
#[test_case("false", false ; "false lower")]
#[test_case("False", false ; "false title")]
fn boolean_keywords(input: &str, expected: bool) {
    let (scanned, substring) = both(input);
    assert_eq!(scanned, JsonValue::Boolean(expected));
    assert_eq!(substring, JsonValue::Boolean(expected));
}

#[test_case("null" ; "null lower")]
#[test_case("NULL" ; "null upper")]
#[test_case("nil" ; "nil lower")]
#[test_case("Nil" ; "nil title")]
fn null_keywords(input: &str) {
    let (scanned, substring) = both(input);
    assert!(scanned.is_null());
    assert!(substring.is_null());
}

// ============================================================================
// Non-standard numeric keywords
// ============================================================================

#[test_case("inf", f64::INFINITY ; "inf")]
#[test_case("+inf", f64::INFINITY ; "plus inf")]
#[test_case("infinity", f64::INFINITY ; "infinity lower")]
#[test_case("Infinity", f64::INFINITY ; "infinity title")]
#[test_case("-inf", f64::NEG_INFINITY ; "minus inf")]
#[test_case("-infinity", f64::NEG_INFINITY ; "minus infinity")]
fn infinite_keywords(input: &str, expected: f64) {
    let (scanned, substring) = both(input);
    assert_eq!(scanned.as_f64(), Some(expected));
    assert_eq!(substring.as_f64(), Some(expected));
}

#[test_case("nan" ; "nan lower")]
#[test_case("NaN" ; "nan mixed")]
#[test_case("NAN" ; "nan upper")]
fn nan_keyword(input: &str) {
    let (scanned, substring) = both(input);
    assert!(scanned.as_f64().unwrap().is_nan());
    assert!(substring.as_f64().unwrap().is_nan());
}

#[test]
fn keywords_inside_containers() {
    let doc = parse(r#"{"a":yes,"b":nil,"c":[no,inf]}"#).unwrap();
    assert_eq!(doc.get("a").unwrap().and_then(JsonValue::as_bool), Some(true));
    assert!(doc.get("b").unwrap().is_some_and(JsonValue::is_null));
    let c = doc.get("c").unwrap().cloned().unwrap();
    assert_eq!(c.get_index(0).unwrap().and_then(JsonValue::as_bool), Some(false));
    assert_eq!(c.get_index(1).unwrap().and_then(JsonValue::as_f64), Some(f64::INFINITY));
}

// ============================================================================
// Serialization never re-emits lenient spellings
// ============================================================================

#[test]
fn lenient_input_normalizes_on_output() {
    assert_eq!(serialize(&parse("yes").unwrap()), "true");
    assert_eq!(serialize(&parse("no").unwrap()), "false");
    assert_eq!(serialize(&parse("nil").unwrap()), "null");
    assert_eq!(serialize(&parse("nan").unwrap()), "null");
    assert_eq!(serialize(&parse("-inf").unwrap()), "null");
}

// ============================================================================
// Binder coercion policy
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct Toggle {
    on: Option<bool>,
    level: Option<i64>,
}

impl Bindable for Toggle {
    fn construct() -> Self {
        Self::default()
    }

    fn bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding::auto(
                "on",
                FieldKind::Flag,
                |t| Ok(t.on.map(FieldValue::Flag)),
                |t, v| {
                    t.on = match v {
                        Some(FieldValue::Flag(b)) => Some(b),
                        _ => None,
                    };
                    Ok(())
                },
            ),
            FieldBinding::auto(
                "level",
                FieldKind::Number(NumberKind::I64),
                |t| Ok(t.level.map(FieldValue::I64)),
                |t, v| {
                    t.level = match v {
                        Some(FieldValue::I64(n)) => Some(n),
                        _ => None,
                    };
                    Ok(())
                },
            ),
        ]
    }
}

#[test]
fn boolean_field_accepts_lenient_literals_from_string_payloads() {
    let doc = parse(r#"{"on":"yes","level":"15"}"#).unwrap();
    let toggle: Toggle = Unmarshaller::new().unmarshal(&doc).unwrap();
    assert_eq!(toggle.on, Some(true));
    assert_eq!(toggle.level, Some(15));
}

#[test]
fn lenient_mode_leaves_uncoercible_fields_unset() {
    let doc = parse(r#"{"on":"maybe","level":"tall"}"#).unwrap();
    let toggle: Toggle = Unmarshaller::new().unmarshal(&doc).unwrap();
    assert_eq!(toggle, Toggle::default());
}

#[test]
fn strict_mode_turns_uncoercible_fields_into_errors() {
    let doc = parse(r#"{"on":"maybe"}"#).unwrap();
    let err = Unmarshaller::strict().unmarshal::<Toggle>(&doc).unwrap_err();
    assert!(matches!(err, BindingError::Coercion { .. }));
}
