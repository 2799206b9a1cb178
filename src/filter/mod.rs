//! Filter algebra editing
//!
//! The query builder keeps its filter forest in immutable UI state, so edits
//! are pure functions that rebuild the path to the changed node.

mod tree;

#[cfg(test)]
mod tests;

pub use tree::{add_child, count_conditions, depth, find_node, remove_node, update_node};
