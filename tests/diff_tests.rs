use jcompare::{compare, parse_json, DiffKind, DiffOptions, DiffRecord, DiffReport, Node, Path};

fn json(text: &str) -> Node {
    parse_json(text).unwrap()
}

fn positional() -> DiffOptions {
    DiffOptions::default()
}

fn unordered() -> DiffOptions {
    DiffOptions {
        ignore_array_order: true,
    }
}

/// (kind, path) pairs in report order.
fn summary(report: &DiffReport) -> Vec<(DiffKind, String)> {
    report
        .iter()
        .map(|r| (r.kind, r.path.to_string()))
        .collect()
}

fn at(path: &str) -> Path {
    let mut result = Path::root();
    for part in path.split('.') {
        result = result.key(part);
    }
    result
}

#[test]
fn test_identity() {
    let doc = json(r#"{"a": [1, {"b": null}], "c": "x", "d": 1.5, "e": [[], {}]}"#);
    assert!(compare(&doc, &doc, &positional()).is_empty());
    assert!(compare(&doc, &doc, &unordered()).is_empty());
}

#[test]
fn test_order_sensitivity() {
    let left = json(r#"{"a": [1, 2]}"#);
    let right = json(r#"{"a": [2, 1]}"#);

    let report = compare(&left, &right, &positional());
    assert_eq!(
        summary(&report),
        vec![
            (DiffKind::Changed, "a[0]".to_string()),
            (DiffKind::Changed, "a[1]".to_string()),
        ]
    );
    assert_eq!(report.records[0].left_value, Some(Node::from(1)));
    assert_eq!(report.records[0].right_value, Some(Node::from(2)));

    assert!(compare(&left, &right, &unordered()).is_empty());
}

#[test]
fn test_type_mismatch_precedence() {
    let report = compare(&json(r#"{"a": 1}"#), &json(r#"{"a": [1]}"#), &positional());
    assert_eq!(
        report.records,
        vec![DiffRecord::type_mismatch(
            at("a"),
            Node::from(1),
            Node::Array(vec![Node::from(1)])
        )]
    );
}

#[test]
fn test_array_vs_object_is_type_mismatch() {
    let report = compare(&json("[]"), &json("{}"), &unordered());
    assert_eq!(summary(&report), vec![(DiffKind::TypeMismatch, String::new())]);
}

#[test]
fn test_number_vs_string_is_type_mismatch() {
    let report = compare(&json(r#"{"v": 1}"#), &json(r#"{"v": "1"}"#), &positional());
    assert_eq!(summary(&report), vec![(DiffKind::TypeMismatch, "v".to_string())]);
}

#[test]
fn test_key_union_completeness() {
    let report = compare(
        &json(r#"{"a": 1, "b": 2}"#),
        &json(r#"{"b": 2, "c": 3}"#),
        &positional(),
    );
    assert_eq!(
        report.records,
        vec![
            DiffRecord::removed(at("a"), Node::from(1)),
            DiffRecord::added(at("c"), Node::from(3)),
        ]
    );
}

#[test]
fn test_nested_path_addressing() {
    let report = compare(
        &json(r#"{"x": {"y": {"z": 1}}}"#),
        &json(r#"{"x": {"y": {"z": 2}}}"#),
        &positional(),
    );
    assert_eq!(
        report.records,
        vec![DiffRecord::changed(at("x.y.z"), Node::from(1), Node::from(2))]
    );
}

#[test]
fn test_empty_vs_non_empty_object() {
    let report = compare(&json("{}"), &json(r#"{"a": 1}"#), &positional());
    assert_eq!(report.records, vec![DiffRecord::added(at("a"), Node::from(1))]);
}

#[test]
fn test_null_value_is_present_not_missing() {
    let report = compare(&json(r#"{"a": null}"#), &json(r#"{}"#), &positional());
    assert_eq!(report.records, vec![DiffRecord::removed(at("a"), Node::Null)]);

    let report = compare(&json(r#"{"a": null}"#), &json(r#"{"a": null}"#), &positional());
    assert!(report.is_empty());
}

#[test]
fn test_positional_length_difference() {
    let report = compare(&json("[1, 2]"), &json("[1, 2, 3, 4]"), &positional());
    assert_eq!(
        report.records,
        vec![
            DiffRecord::added(Path::root().index(2), Node::from(3)),
            DiffRecord::added(Path::root().index(3), Node::from(4)),
        ]
    );

    let report = compare(&json("[1, 2, 3]"), &json("[9]"), &positional());
    assert_eq!(
        summary(&report),
        vec![
            (DiffKind::Changed, "[0]".to_string()),
            (DiffKind::Removed, "[1]".to_string()),
            (DiffKind::Removed, "[2]".to_string()),
        ]
    );
}

#[test]
fn test_full_document_sequence() {
    let left = json(
        r#"{
            "name": "DevEase",
            "version": "1.0.0",
            "features": ["json", "sql", "base64"],
            "config": {"theme": "dark", "language": "en"},
            "active": true
        }"#,
    );
    let right = json(
        r#"{
            "name": "DevEase Pro",
            "version": "2.0.0",
            "features": ["json", "sql", "base64", "jwt"],
            "config": {"theme": "light", "language": "en", "beta": true},
            "deprecated": false
        }"#,
    );

    let report = compare(&left, &right, &positional());
    assert_eq!(
        summary(&report),
        vec![
            (DiffKind::Changed, "name".to_string()),
            (DiffKind::Changed, "version".to_string()),
            (DiffKind::Added, "features[3]".to_string()),
            (DiffKind::Changed, "config.theme".to_string()),
            (DiffKind::Added, "config.beta".to_string()),
            (DiffKind::Removed, "active".to_string()),
            (DiffKind::Added, "deprecated".to_string()),
        ]
    );
    assert_eq!(report.stats.added, 3);
    assert_eq!(report.stats.removed, 1);
    assert_eq!(report.stats.changed, 3);
    assert_eq!(report.stats.total(), 7);
}

#[test]
fn test_unordered_reports_original_indices() {
    // What reads as a move is reported at each side's own index.
    let report = compare(&json(r#"["a", "b", "c"]"#), &json(r#"["b", "c", "d"]"#), &unordered());
    assert_eq!(
        report.records,
        vec![
            DiffRecord::removed(Path::root().index(0), Node::from("a")),
            DiffRecord::added(Path::root().index(2), Node::from("d")),
        ]
    );
}

#[test]
fn test_unordered_left_unmatched_before_right_unmatched() {
    let report = compare(&json("[1, 2, 5]"), &json("[3, 2, 4]"), &unordered());
    assert_eq!(
        summary(&report),
        vec![
            (DiffKind::Removed, "[0]".to_string()),
            (DiffKind::Removed, "[2]".to_string()),
            (DiffKind::Added, "[0]".to_string()),
            (DiffKind::Added, "[2]".to_string()),
        ]
    );
}

#[test]
fn test_unordered_duplicates_are_counted() {
    let report = compare(&json("[1, 2, 2]"), &json("[2, 1, 1]"), &unordered());
    assert_eq!(
        report.records,
        vec![
            DiffRecord::removed(Path::root().index(2), Node::from(2)),
            DiffRecord::added(Path::root().index(2), Node::from(1)),
        ]
    );
}

#[test]
fn test_unordered_does_not_recurse_into_elements() {
    let report = compare(
        &json(r#"{"items": [{"id": 1, "name": "a"}]}"#),
        &json(r#"{"items": [{"id": 1, "name": "b"}]}"#),
        &unordered(),
    );
    assert_eq!(
        summary(&report),
        vec![
            (DiffKind::Removed, "items[0]".to_string()),
            (DiffKind::Added, "items[0]".to_string()),
        ]
    );
}

#[test]
fn test_unordered_nested_objects_with_reordered_keys() {
    let report = compare(
        &json(r#"[{"id": 1, "tags": ["x"]}, {"id": 2}]"#),
        &json(r#"[{"id": 2}, {"tags": ["x"], "id": 1.0}]"#),
        &unordered(),
    );
    assert!(report.is_empty());
}

#[test]
fn test_unordered_applies_below_objects_only_to_arrays() {
    let report = compare(
        &json(r#"{"a": [1, 2], "b": 1}"#),
        &json(r#"{"a": [2, 1], "b": 2}"#),
        &unordered(),
    );
    assert_eq!(summary(&report), vec![(DiffKind::Changed, "b".to_string())]);
}

#[test]
fn test_numeric_equality_rule() {
    // Integers compare exactly beyond 2^53.
    let report = compare(
        &json("9007199254740993"),
        &json("9007199254740992"),
        &positional(),
    );
    assert_eq!(report.len(), 1);

    // Integer and float spellings of the same value are equal.
    assert!(compare(&json("[1, -0.0, 100]"), &json("[1.0, 0, 1e2]"), &positional()).is_empty());

    // NaN equals NaN and signed zeros are equal.
    assert!(compare(&Node::from(f64::NAN), &Node::from(f64::NAN), &positional()).is_empty());
    assert!(compare(&Node::from(-0.0), &Node::from(0.0), &positional()).is_empty());
    assert_eq!(
        compare(&Node::from(f64::NAN), &Node::from(0.0), &positional()).len(),
        1
    );
}

#[test]
fn test_numeric_rule_in_unordered_mode() {
    let left = Node::Array(vec![Node::from(f64::NAN), Node::from(-0.0), Node::from(3)]);
    let right = Node::Array(vec![Node::from(3.0), Node::from(0), Node::from(f64::NAN)]);
    assert!(compare(&left, &right, &unordered()).is_empty());
}

#[test]
fn test_inputs_are_not_modified() {
    let left = json(r#"{"a": [3, 1], "b": {"c": 1}}"#);
    let right = json(r#"{"a": [1, 3], "b": {"c": 2}}"#);
    let (left_copy, right_copy) = (left.clone(), right.clone());

    compare(&left, &right, &unordered());

    assert_eq!(left, left_copy);
    assert_eq!(right, right_copy);
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    const DEPTH: usize = 50_000;

    // DEPTH levels of `[{"k": ...}]` around differing leaves, so the leaf
    // sits 100,000 segments below the root.
    let mut left = Node::from(1);
    let mut right = Node::from(2);
    for _ in 0..DEPTH {
        left = Node::Array(vec![Node::object([("k", left)])]);
        right = Node::Array(vec![Node::object([("k", right)])]);
    }

    let report = compare(&left, &right, &positional());
    assert_eq!(report.len(), 1);
    assert_eq!(report.records[0].kind, DiffKind::Changed);
    assert_eq!(report.records[0].path.segments().len(), DEPTH * 2);
    assert!(report.records[0].path.to_string().starts_with("[0].k[0].k"));

    // Dropping trees this deep recurses; the comparison is what is under test.
    std::mem::forget(left);
    std::mem::forget(right);
}

#[test]
fn test_deep_array_nesting() {
    const DEPTH: usize = 100_000;

    let mut left = Node::from(1);
    let mut right = Node::from(2);
    for _ in 0..DEPTH {
        left = Node::Array(vec![left]);
        right = Node::Array(vec![right]);
    }

    let report = compare(&left, &right, &positional());
    assert_eq!(report.len(), 1);
    assert_eq!(report.records[0].kind, DiffKind::Changed);
    assert_eq!(report.records[0].path.segments().len(), DEPTH);
    assert!(report.records[0].path.to_string().starts_with("[0][0][0]"));

    std::mem::forget(left);
    std::mem::forget(right);
}

#[test]
fn test_empty_key_adds_no_leading_dot() {
    let report = compare(
        &json(r#"{"": {"x": 1}, "a": {"": {"y": 1}}}"#),
        &json(r#"{"": {"x": 2}, "a": {"": {"y": 2}}}"#),
        &positional(),
    );
    let paths: Vec<String> = report.iter().map(|r| r.path.to_string()).collect();
    assert_eq!(paths, vec!["x", "a..y"]);
    assert_eq!(report.records[0].path.segments().len(), 2);
}
