//! Strategy equivalence tests.
//!
//! The two parsing strategies must produce structurally equal trees for
//! the same well-formed input, and the two serialization strategies must
//! produce byte-identical text for the same tree. The scanning parser is
//! additionally cross-checked against serde_json on strict-JSON inputs.

use feather_json::{
    parse, serialize, ArrayBuilder, ForkJoinSerializer, JsonParse, JsonSerialize, JsonValue,
    ObjectBuilder, RecursiveSerializer, ScanningParser, SubstringParser,
};
use time::macros::datetime;

// ============================================================================
// Parser equivalence
// ============================================================================

const WELL_FORMED: &[&str] = &[
    "{}",
    "[]",
    "42",
    "-17",
    "2.5",
    "-0.125",
    "\"hello\"",
    "true",
    "false",
    "null",
    r#"{"a":1,"b":[1,2,3]}"#,
    r#"[1,[2,[3,[4]]]]"#,
    r#"{"outer":{"inner":{"deepest":[{"x":1},{"y":2}]}},"tail":"end"}"#,
    r#"{"text":"commas, and } braces","n":1}"#,
    r#"{"escaped":"say \"hi\"","quote":"don\'t"}"#,
    r#"[{"a":null},{"b":true},{"c":"x"}]"#,
    r#" { "spaced" : [ 1 , 2 , 3 ] } "#,
    r#"{"empty_obj":{},"empty_arr":[]}"#,
];

#[test]
fn parsing_strategies_agree_on_well_formed_input() {
    for input in WELL_FORMED {
        let scanned = ScanningParser.parse(input).unwrap();
        let substring = SubstringParser.parse(input).unwrap();
        assert_eq!(
            scanned, substring,
            "strategies disagree on input: {input}"
        );
    }
}

#[test]
fn parsing_strategies_agree_on_lenient_literals() {
    for input in ["yes", "no", "nil", "inf", "-inf", "{12:\"a\"}"] {
        let scanned = ScanningParser.parse(input).unwrap();
        let substring = SubstringParser.parse(input).unwrap();
        assert_eq!(scanned, substring, "strategies disagree on input: {input}");
    }
}

// ============================================================================
// Differential check against serde_json (strict-JSON subset)
// ============================================================================

fn to_serde(value: &JsonValue) -> serde_json::Value {
    match value {
        JsonValue::Object(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_serde(v)))
                .collect(),
        ),
        JsonValue::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(to_serde).collect())
        }
        JsonValue::String(s) => serde_json::Value::String(s.clone()),
        JsonValue::Number(n) => {
            if n.is_integer() {
                serde_json::Value::from(n.as_i64())
            } else {
                serde_json::Value::from(n.as_f64())
            }
        }
        JsonValue::Boolean(b) => serde_json::Value::Bool(*b),
        JsonValue::Null | JsonValue::Date(_) => serde_json::Value::Null,
    }
}

#[test]
fn scanning_parser_matches_serde_json_on_strict_input() {
    let strict: &[&str] = &[
        "{}",
        "[]",
        "42",
        "-17",
        "2.5",
        "true",
        "null",
        r#"{"a":1,"b":[1,2,3]}"#,
        r#"{"outer":{"inner":[1,2.5,"x",false,null]}}"#,
        r#"[[1],[2,[3]],{"k":"v"}]"#,
    ];
    for input in strict {
        let ours = to_serde(&ScanningParser.parse(input).unwrap());
        let reference: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(ours, reference, "tree mismatch against reference on: {input}");
    }
}

// ============================================================================
// Serializer equivalence
// ============================================================================

fn nested_leaves(levels: usize, fanout: usize) -> JsonValue {
    if levels == 0 {
        return JsonValue::from(1i64);
    }
    let mut builder = ArrayBuilder::new();
    for _ in 0..fanout {
        builder = builder.append(nested_leaves(levels - 1, fanout));
    }
    builder.build()
}

#[test]
fn serializers_agree_on_a_three_level_array_of_1000_leaves() {
    let tree = nested_leaves(3, 10); // 10 x 10 x 10 leaves
    let sequential = RecursiveSerializer.serialize(&tree);
    let parallel = ForkJoinSerializer::new().serialize(&tree);
    assert_eq!(sequential, parallel);
}

#[test]
fn serializers_agree_on_a_mixed_document() {
    let doc = ObjectBuilder::new()
        .append("text", "line\nbreak 'and' \"quotes\"")
        .append("numbers", ArrayBuilder::new().append(1i64).append(2.5).append(-3i64))
        .append("when", datetime!(2020-06-01 12:00:00 UTC))
        .append("nested", ObjectBuilder::new().append("deep", nested_leaves(2, 6)))
        .append("none", feather_json::builder::null())
        .build();
    let sequential = RecursiveSerializer.serialize(&doc);
    let parallel = ForkJoinSerializer::new().serialize(&doc);
    assert_eq!(sequential, parallel);
}

#[test]
fn serializers_agree_for_every_worker_count() {
    let tree = nested_leaves(2, 12);
    let sequential = RecursiveSerializer.serialize(&tree);
    for workers in [1, 2, 3, 8, 64] {
        assert_eq!(
            ForkJoinSerializer::with_workers(workers).serialize(&tree),
            sequential,
            "fork-join output diverged with {workers} workers"
        );
    }
}

// ============================================================================
// Idempotence: one serialize/parse round trip stabilizes the text
// ============================================================================

#[test]
fn serialization_is_stable_after_one_round_trip() {
    let trees = [
        ObjectBuilder::new()
            .append("a", 1i64)
            .append("b", ArrayBuilder::new().append("x").append(2.0))
            .append("stamp", datetime!(1999-01-02 03:04:05 UTC))
            .build(),
        nested_leaves(3, 4),
        JsonValue::from("escape \"this\"\nplease"),
        JsonValue::from(f64::NAN), // renders as null, which parses and stays null
    ];
    for tree in &trees {
        let first = serialize(tree);
        let reparsed = parse(&first).unwrap();
        assert_eq!(serialize(&reparsed), first);
    }
}

// ============================================================================
// Boundary values
// ============================================================================

#[test]
fn boundary_documents_parse_to_the_matching_variant() {
    for parser in [&ScanningParser as &dyn JsonParse, &SubstringParser] {
        assert_eq!(parser.parse("{}").unwrap().size().unwrap(), 0);
        assert_eq!(parser.parse("[]").unwrap().size().unwrap(), 0);
        assert_eq!(parser.parse("\"x\"").unwrap(), JsonValue::from("x"));
        assert_eq!(parser.parse("42").unwrap(), JsonValue::from(42i64));
        assert_eq!(parser.parse("true").unwrap(), JsonValue::Boolean(true));
        assert_eq!(parser.parse("null").unwrap(), JsonValue::Null);
    }
}
