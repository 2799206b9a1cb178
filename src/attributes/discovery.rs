//! Attribute type inference from sampled documents
//!
//! Type names follow the vector database's schema vocabulary: `string`,
//! `int`, `uint`, `float`, `bool`, `uuid`, `datetime`, and `[]T` for arrays
//! of `T`. Heterogeneous arrays are reported as `array`; attributes whose
//! samples disagree fall back to `string`.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::core::types::{is_array_type, DiscoveredAttribute};

/// Maximum sample values kept per attribute
pub const MAX_SAMPLE_VALUES: usize = 5;

/// Attributes never offered to the filter builder
const SKIPPED_ATTRIBUTES: &[&str] = &["vector", "$dist"];

/// Infer attribute types from sampled documents, sorted by name
pub fn discover_attributes(documents: &[Map<String, Value>]) -> Vec<DiscoveredAttribute> {
    let mut found: BTreeMap<String, DiscoveredAttribute> = BTreeMap::new();

    for document in documents {
        for (name, value) in document {
            if SKIPPED_ATTRIBUTES.contains(&name.as_str()) || value.is_null() {
                continue;
            }
            let inferred = infer_type(value);
            let entry = found
                .entry(name.clone())
                .or_insert_with(|| DiscoveredAttribute::new(name.clone(), inferred.clone()));

            if entry.attr_type != inferred {
                entry.attr_type = merge_types(&entry.attr_type, &inferred);
                entry.is_array = is_array_type(&entry.attr_type);
            }
            entry.occurrences += 1;
            if entry.sample_values.len() < MAX_SAMPLE_VALUES && !entry.sample_values.contains(value)
            {
                entry.sample_values.push(value.clone());
            }
        }
    }

    debug!(
        documents = documents.len(),
        attributes = found.len(),
        "Discovered attributes"
    );
    found.into_values().collect()
}

/// Type name of a single JSON value
pub fn infer_type(value: &Value) -> String {
    match value {
        Value::Bool(_) => "bool".to_string(),
        Value::Number(n) => {
            if n.is_u64() {
                "uint".to_string()
            } else if n.is_i64() {
                "int".to_string()
            } else {
                "float".to_string()
            }
        }
        Value::String(s) => string_type(s).to_string(),
        Value::Array(items) => {
            let scalars = items
                .iter()
                .all(|item| !item.is_null() && !item.is_array() && !item.is_object());
            if items.is_empty() || !scalars {
                return "array".to_string();
            }
            let element = items
                .iter()
                .map(infer_type)
                .map(Some)
                .reduce(|acc, t| acc.zip(t).and_then(|(a, b)| common_type(&a, &b)))
                .flatten();
            match element {
                Some(element) => format!("[]{}", element),
                None => "array".to_string(),
            }
        }
        Value::Object(_) => "object".to_string(),
        Value::Null => "null".to_string(),
    }
}

fn string_type(s: &str) -> &'static str {
    if Uuid::parse_str(s).is_ok() {
        "uuid"
    } else if DateTime::parse_from_rfc3339(s).is_ok() {
        "datetime"
    } else {
        "string"
    }
}

/// Common type of two samples of one attribute
fn merge_types(a: &str, b: &str) -> String {
    if let Some(merged) = common_type(a, b) {
        return merged;
    }
    match (a.strip_prefix("[]"), b.strip_prefix("[]")) {
        (Some(x), Some(y)) => common_type(x, y)
            .map(|element| format!("[]{}", element))
            .unwrap_or_else(|| "array".to_string()),
        _ if is_array_type(a) && is_array_type(b) => "array".to_string(),
        _ => "string".to_string(),
    }
}

/// Narrowest type covering both, if the two are compatible
fn common_type(a: &str, b: &str) -> Option<String> {
    if a == b {
        return Some(a.to_string());
    }
    let numeric = |t: &str| matches!(t, "uint" | "int" | "float");
    let textual = |t: &str| matches!(t, "string" | "uuid" | "datetime");
    match (a, b) {
        ("uint", "int") | ("int", "uint") => Some("int".to_string()),
        (x, y) if numeric(x) && numeric(y) => Some("float".to_string()),
        (x, y) if textual(x) && textual(y) => Some("string".to_string()),
        _ => None,
    }
}
