//! Purpose: Lock report output contract expectations with corpus coverage.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch drift in heading framing, section order, and body round-tripping.
//! Invariants: Printed bodies stay valid JSON equal to the decoded match value.
//! Invariants: Every section keeps one blank line after its underline and body.

use matchbook::{Document, RenderOptions, heading, render_report};
use serde_json::{Value, json};

fn source_for(entries: &[(&str, &Value)]) -> String {
    let mut map = serde_json::Map::new();
    for (name, value) in entries {
        let encoded = serde_json::to_string(value).expect("encode inner");
        map.insert((*name).to_string(), Value::String(encoded));
    }
    Value::Object(map).to_string()
}

fn render(source: &str) -> String {
    let doc = Document::parse(source).expect("parse document");
    render_report(&doc, &RenderOptions::default()).expect("render report")
}

fn body_of(output: &str, name: &str) -> String {
    let head = heading(name);
    let rest = output.strip_prefix(head.as_str()).expect("heading frame");
    let body = rest.strip_suffix("\n\n").expect("trailing frame");
    body.to_string()
}

#[test]
fn printed_bodies_reparse_to_the_decoded_value() {
    let mut corpus = vec![
        json!(null),
        json!(true),
        json!(-42),
        json!(u64::MAX),
        json!(3.5),
        json!("line\nbreak and \"quotes\" and \\ backslash"),
        json!([]),
        json!({}),
        json!([1, 2, 3]),
        json!({"x": true, "y": [null, "z"]}),
        json!({"outer": {"inner": [{"k": "v"}, [1.25, 2.5]]}}),
    ];
    corpus.push(Value::Array((0..40).map(Value::from).collect()));

    for value in corpus {
        let source = source_for(&[("rule", &value)]);
        let output = render(&source);
        let body = body_of(&output, "rule");
        let reparsed: Value = serde_json::from_str(&body).expect("body reparses");
        assert_eq!(reparsed, value, "round-trip mismatch for {value}");
    }
}

#[test]
fn headings_underline_by_character_count() {
    for name in ["a", "rule_one", "règle", "δ-rule"] {
        let source = source_for(&[(name, &json!(1))]);
        let output = render(&source);
        let expected = format!("{name}\n{}\n\n1\n\n", "-".repeat(name.chars().count()));
        assert_eq!(output, expected, "heading frame for {name}");
    }
}

#[test]
fn sections_follow_document_order_with_single_blank_lines() {
    let source = source_for(&[
        ("zeta", &json!(1)),
        ("alpha", &json!(2)),
        ("middle", &json!(3)),
    ]);
    let output = render(&source);
    assert_eq!(
        output,
        "zeta\n----\n\n1\n\nalpha\n-----\n\n2\n\nmiddle\n------\n\n3\n\n"
    );
}

#[test]
fn separators_hold_for_wrapped_bodies() {
    let long = Value::Array((0..40).map(Value::from).collect());
    let source = source_for(&[("first", &long), ("second", &json!("tail"))]);
    let output = render(&source);

    let wrapped = output
        .strip_prefix(heading("first").as_str())
        .expect("first heading");
    assert!(wrapped.starts_with("[\n  0,\n  1,"));
    assert!(output.contains("\n]\n\nsecond\n------\n\n\"tail\"\n\n"));
    assert!(!output.contains("\n\n\n"));
    assert!(output.ends_with("\n\n"));
}

#[test]
fn object_keys_keep_document_order_in_bodies() {
    let value = json!({"zeta": 1, "alpha": 2, "middle": 3});
    let source = source_for(&[("rule", &value)]);
    let output = render(&source);
    let body = body_of(&output, "rule");
    assert_eq!(body, "{\"zeta\": 1, \"alpha\": 2, \"middle\": 3}");
}
