//! Attribute discovery
//!
//! Infers attribute types from a sample of namespace documents so the
//! converter can tell array attributes from scalars.

mod discovery;

#[cfg(test)]
mod tests;

pub use crate::core::types::{is_array_attribute, is_array_type, DiscoveredAttribute};
pub use discovery::{discover_attributes, infer_type, MAX_SAMPLE_VALUES};
