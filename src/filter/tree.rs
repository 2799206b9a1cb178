//! Pure filter tree edits
//!
//! Every edit returns a new forest and leaves the input untouched. Nodes off
//! the edited path are cloned as-is; ancestors of the edited node are rebuilt.

use crate::core::types::FilterNode;

/// Find a node anywhere in the forest
pub fn find_node<'a>(nodes: &'a [FilterNode], id: &str) -> Option<&'a FilterNode> {
    nodes.iter().find_map(|node| {
        if node.id() == id {
            Some(node)
        } else {
            find_node(node.children(), id)
        }
    })
}

/// Apply `f` to the node with `id`. The forest is returned unchanged when no
/// node matches.
pub fn update_node<F>(nodes: &[FilterNode], id: &str, f: F) -> Vec<FilterNode>
where
    F: Fn(&FilterNode) -> FilterNode,
{
    nodes.iter().map(|node| update_in(node, id, &f)).collect()
}

fn update_in<F>(node: &FilterNode, id: &str, f: &F) -> FilterNode
where
    F: Fn(&FilterNode) -> FilterNode,
{
    if node.id() == id {
        return f(node);
    }
    map_children(node, |children| {
        children.iter().map(|child| update_in(child, id, f)).collect()
    })
}

/// Remove the node with `id` and its subtree
pub fn remove_node(nodes: &[FilterNode], id: &str) -> Vec<FilterNode> {
    nodes
        .iter()
        .filter(|node| node.id() != id)
        .map(|node| map_children(node, |children| remove_node(children, id)))
        .collect()
}

/// Append `child` under the composite node `parent_id`. Leaves cannot take
/// children, so targeting one leaves the forest unchanged.
pub fn add_child(nodes: &[FilterNode], parent_id: &str, child: FilterNode) -> Vec<FilterNode> {
    update_node(nodes, parent_id, |parent| match parent {
        FilterNode::Simple { .. } => parent.clone(),
        composite => map_children(composite, |children| {
            let mut children = children.to_vec();
            children.push(child.clone());
            children
        }),
    })
}

/// Number of leaf comparisons in the forest
pub fn count_conditions(nodes: &[FilterNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            FilterNode::Simple { .. } => 1,
            composite => count_conditions(composite.children()),
        })
        .sum()
}

/// Depth of the deepest node, 0 for an empty forest
pub fn depth(nodes: &[FilterNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + depth(node.children()))
        .max()
        .unwrap_or(0)
}

/// Rebuild a composite node with new children; leaves are cloned
fn map_children<F>(node: &FilterNode, f: F) -> FilterNode
where
    F: FnOnce(&[FilterNode]) -> Vec<FilterNode>,
{
    match node {
        FilterNode::Simple { .. } => node.clone(),
        FilterNode::And { id, children } => FilterNode::And {
            id: id.clone(),
            children: f(children),
        },
        FilterNode::Or { id, children } => FilterNode::Or {
            id: id.clone(),
            children: f(children),
        },
        FilterNode::Not { id, children } => FilterNode::Not {
            id: id.clone(),
            children: f(children),
        },
    }
}
