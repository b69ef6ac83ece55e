use jcompare::{parse_json, Node, NodeKind, Number};

#[test]
fn test_kind_names() {
    assert_eq!(Node::Null.type_name(), "null");
    assert_eq!(Node::from(true).type_name(), "boolean");
    assert_eq!(Node::from(1).type_name(), "number");
    assert_eq!(Node::from("s").type_name(), "string");
    assert_eq!(Node::Array(vec![]).type_name(), "array");
    assert_eq!(Node::Object(vec![]).type_name(), "object");
}

#[test]
fn test_every_tag_is_its_own_kind() {
    let nodes = [
        Node::Null,
        Node::from(false),
        Node::from(0),
        Node::from(""),
        Node::Array(vec![]),
        Node::Object(vec![]),
    ];
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate() {
            assert_eq!(a.kind() == b.kind(), i == j);
        }
    }
    assert_eq!(Node::from(1.5).kind(), NodeKind::Number);
}

#[test]
fn test_display_is_compact_json_in_key_order() {
    let node = parse_json(r#"{ "b": [1, 2.5, null], "a": {"t": true} }"#).unwrap();
    assert_eq!(node.to_string(), r#"{"b":[1,2.5,null],"a":{"t":true}}"#);
}

#[test]
fn test_display_non_finite_numbers() {
    assert_eq!(Node::from(f64::NAN).to_string(), "NaN");
    assert_eq!(Node::from(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Node::from(f64::NEG_INFINITY).to_string(), "-Infinity");
}

#[test]
fn test_preview_short_values_untouched() {
    let node = Node::from("hello");
    assert_eq!(node.preview(80), "\"hello\"");
}

#[test]
fn test_preview_truncates_long_values() {
    let node = Node::Array((0..100).map(Node::from).collect());
    let preview = node.preview(20);
    assert_eq!(preview.chars().count(), 20);
    assert!(preview.ends_with("..."));
    assert!(preview.starts_with("[0,1,2,"));
}

#[test]
fn test_get_only_on_objects() {
    let node = parse_json(r#"{"a": {"b": 1}}"#).unwrap();
    assert_eq!(node.get("a").and_then(|a| a.get("b")), Some(&Node::from(1)));
    assert_eq!(node.get("missing"), None);
    assert_eq!(Node::from(1).get("a"), None);
}

#[test]
fn test_number_mixed_representations() {
    assert_eq!(Number::Int(5), Number::Float(5.0));
    assert_eq!(Number::UInt(5), Number::Float(5.0));
    assert_ne!(Number::Int(5), Number::Float(5.000_001));
    assert_eq!(Number::Float(0.1 + 0.2), Number::Float(0.1 + 0.2));
    assert_ne!(Number::Float(0.1 + 0.2), Number::Float(0.3));
}
