//! Tests for attribute discovery

use serde_json::{json, Map, Value};

use super::*;

fn docs(values: Vec<Value>) -> Vec<Map<String, Value>> {
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

fn find<'a>(attributes: &'a [DiscoveredAttribute], name: &str) -> &'a DiscoveredAttribute {
    attributes
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("attribute {} not discovered", name))
}

#[test]
fn test_infer_scalar_types() {
    assert_eq!(infer_type(&json!(true)), "bool");
    assert_eq!(infer_type(&json!(7)), "uint");
    assert_eq!(infer_type(&json!(-7)), "int");
    assert_eq!(infer_type(&json!(1.5)), "float");
    assert_eq!(infer_type(&json!("hello")), "string");
    assert_eq!(
        infer_type(&json!("0191c2a4-3b5e-7c2d-9a8b-1234567890ab")),
        "uuid"
    );
    assert_eq!(infer_type(&json!("2024-05-01T12:00:00Z")), "datetime");
    assert_eq!(infer_type(&json!({"a": 1})), "object");
}

#[test]
fn test_infer_array_types() {
    assert_eq!(infer_type(&json!(["a", "b"])), "[]string");
    assert_eq!(infer_type(&json!([1, 2, 3])), "[]uint");
    assert_eq!(infer_type(&json!([1, -2])), "[]int");
    assert_eq!(infer_type(&json!([1, 2.5])), "[]float");
    assert_eq!(infer_type(&json!([1, "a"])), "array");
    assert_eq!(infer_type(&json!([[1], [2]])), "array");
    assert_eq!(infer_type(&json!([])), "array");
}

#[test]
fn test_discover_sorted_and_skips_vectors() {
    let documents = docs(vec![
        json!({"id": 1, "title": "a", "vector": [0.1, 0.2], "$dist": 0.5}),
        json!({"id": 2, "tags": ["x", "y"]}),
    ]);
    let attributes = discover_attributes(&documents);

    let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "tags", "title"]);

    let tags = find(&attributes, "tags");
    assert_eq!(tags.attr_type, "[]string");
    assert!(tags.is_array);
    assert!(is_array_attribute(&attributes, "tags"));
    assert!(!is_array_attribute(&attributes, "title"));
    assert!(!is_array_attribute(&attributes, "unknown"));
}

#[test]
fn test_discover_counts_and_samples() {
    let documents = docs(
        (0..10)
            .map(|i| {
                let status = if i % 2 == 0 { "open" } else { "closed" };
                json!({"n": i, "status": status})
            })
            .collect(),
    );
    let attributes = discover_attributes(&documents);

    let n = find(&attributes, "n");
    assert_eq!(n.occurrences, 10);
    assert_eq!(n.sample_values.len(), MAX_SAMPLE_VALUES);

    let status = find(&attributes, "status");
    assert_eq!(status.sample_values, vec![json!("open"), json!("closed")]);
}

#[test]
fn test_discover_merges_disagreeing_samples() {
    let documents = docs(vec![
        json!({"score": 1, "label": "a", "ids": [1, 2], "mixed": "text", "note": null}),
        json!({
            "score": 0.5,
            "label": "0191c2a4-3b5e-7c2d-9a8b-1234567890ab",
            "ids": [-1],
            "mixed": 3
        }),
    ]);
    let attributes = discover_attributes(&documents);

    assert_eq!(find(&attributes, "score").attr_type, "float");
    assert_eq!(find(&attributes, "label").attr_type, "string");
    assert_eq!(find(&attributes, "ids").attr_type, "[]int");
    assert_eq!(find(&attributes, "mixed").attr_type, "string");
    // Null-only attributes carry no type information
    assert!(attributes.iter().all(|a| a.name != "note"));
}

#[test]
fn test_array_type_rule() {
    assert!(is_array_type("[]string"));
    assert!(is_array_type("[]uint"));
    assert!(is_array_type("array"));
    assert!(!is_array_type("string"));
    assert!(!is_array_type("arrays"));
}

#[test]
fn test_attribute_json_shape() {
    let attribute: DiscoveredAttribute =
        serde_json::from_value(json!({"name": "tags", "type": "[]string"})).unwrap();
    assert!(attribute.is_array_type());
    assert!(attribute.sample_values.is_empty());

    let json = serde_json::to_value(DiscoveredAttribute::new("n", "uint")).unwrap();
    assert_eq!(json["type"], json!("uint"));
    assert_eq!(json["isArray"], json!(false));
}
