//! Discovered attribute metadata
//!
//! Attribute descriptions come from sampling namespace documents. The converter
//! only reads them to decide whether an attribute holds arrays.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inferred type information for one document attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAttribute {
    pub name: String,

    /// Type name such as `string`, `uint`, `[]string` or `array`
    #[serde(rename = "type")]
    pub attr_type: String,

    #[serde(default)]
    pub sample_values: Vec<Value>,

    #[serde(default)]
    pub is_array: bool,

    /// Number of sampled documents carrying the attribute
    #[serde(default)]
    pub occurrences: usize,
}

impl DiscoveredAttribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        let attr_type = attr_type.into();
        Self {
            name: name.into(),
            is_array: is_array_type(&attr_type),
            attr_type,
            sample_values: Vec::new(),
            occurrences: 0,
        }
    }

    /// Whether the attribute's type denotes an array
    pub fn is_array_type(&self) -> bool {
        is_array_type(&self.attr_type)
    }
}

/// Array types are `[]`-prefixed type names or the literal `array`
pub fn is_array_type(attr_type: &str) -> bool {
    attr_type.starts_with("[]") || attr_type == "array"
}

/// Whether `name` is known to hold arrays. Unknown attributes count as scalars.
pub fn is_array_attribute(attributes: &[DiscoveredAttribute], name: &str) -> bool {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(DiscoveredAttribute::is_array_type)
        .unwrap_or(false)
}
