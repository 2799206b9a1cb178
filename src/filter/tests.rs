//! Tests for filter tree editing

use proptest::prelude::*;

use super::*;
use crate::core::types::{FilterNode, FilterOperator};

fn leaf(id: &str, attribute: &str) -> FilterNode {
    FilterNode::simple(attribute, FilterOperator::Equals, "v").with_id(id)
}

/// `a AND (b OR NOT c)`, plus a second top-level leaf `d`
fn sample_forest() -> Vec<FilterNode> {
    vec![
        FilterNode::and(vec![
            leaf("a", "a"),
            FilterNode::or(vec![
                leaf("b", "b"),
                FilterNode::not(leaf("c", "c")).with_id("not"),
            ])
            .with_id("or"),
        ])
        .with_id("and"),
        leaf("d", "d"),
    ]
}

fn attribute_of(node: &FilterNode) -> Option<&str> {
    match node {
        FilterNode::Simple { attribute, .. } => Some(attribute),
        _ => None,
    }
}

// ============================================================================
// Property tests
// ============================================================================

/// Arbitrary filter forests with unique ids
fn forest_strategy() -> impl Strategy<Value = Vec<FilterNode>> {
    let leaf = "[a-z]{1,6}"
        .prop_map(|attribute| FilterNode::simple(attribute, FilterOperator::Equals, 1i64));
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FilterNode::and),
            prop::collection::vec(inner.clone(), 0..4).prop_map(FilterNode::or),
            inner.prop_map(FilterNode::not),
        ]
    });
    prop::collection::vec(tree, 0..5)
}

fn all_ids(nodes: &[FilterNode]) -> Vec<String> {
    nodes
        .iter()
        .flat_map(|node| {
            let mut ids = vec![node.id().to_string()];
            ids.extend(all_ids(node.children()));
            ids
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every node in the forest can be found by id
    #[test]
    fn prop_every_node_findable(forest in forest_strategy()) {
        for id in all_ids(&forest) {
            let found = find_node(&forest, &id);
            prop_assert_eq!(found.map(FilterNode::id), Some(id.as_str()));
        }
    }

    /// Updating an unknown id returns an identical forest
    #[test]
    fn prop_update_unknown_id_is_identity(forest in forest_strategy()) {
        let updated = update_node(&forest, "missing", |node| FilterNode::not(node.clone()));
        prop_assert_eq!(updated, forest);
    }

    /// Removing a node removes exactly its subtree
    #[test]
    fn prop_remove_drops_subtree(
        forest in forest_strategy(),
        pick in any::<prop::sample::Index>()
    ) {
        let ids = all_ids(&forest);
        prop_assume!(!ids.is_empty());
        let target = &ids[pick.index(ids.len())];
        let subtree_size = find_node(&forest, target)
            .map(|node| all_ids(std::slice::from_ref(node)).len())
            .unwrap_or(0);

        let remaining = remove_node(&forest, target);

        prop_assert!(find_node(&remaining, target).is_none());
        prop_assert_eq!(all_ids(&remaining).len(), ids.len() - subtree_size);
    }

    /// Edits never touch the input forest
    #[test]
    fn prop_edits_are_pure(forest in forest_strategy()) {
        let before = forest.clone();
        for id in all_ids(&forest) {
            let _ = remove_node(&forest, &id);
            let _ = add_child(&forest, &id, FilterNode::simple("x", FilterOperator::Less, 3i64));
        }
        prop_assert_eq!(forest, before);
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tree_tests {
    use super::*;

    #[test]
    fn test_find_nested_node() {
        let forest = sample_forest();
        let found = find_node(&forest, "c").unwrap();
        assert_eq!(attribute_of(found), Some("c"));
        assert!(find_node(&forest, "nope").is_none());
    }

    #[test]
    fn test_update_leaf() {
        let forest = sample_forest();
        let updated = update_node(&forest, "b", |_| leaf("b", "renamed"));

        assert_eq!(attribute_of(find_node(&updated, "b").unwrap()), Some("renamed"));
        assert_eq!(attribute_of(find_node(&forest, "b").unwrap()), Some("b"));
        // Untouched siblings and ancestors keep their ids
        assert!(find_node(&updated, "or").is_some());
        assert_eq!(updated[1], forest[1]);
    }

    #[test]
    fn test_update_can_replace_group() {
        let forest = sample_forest();
        let updated = update_node(&forest, "or", |node| match node {
            FilterNode::Or { id, children } => FilterNode::And {
                id: id.clone(),
                children: children.clone(),
            },
            other => other.clone(),
        });
        assert!(matches!(find_node(&updated, "or"), Some(FilterNode::And { .. })));
        assert_eq!(count_conditions(&updated), count_conditions(&forest));
    }

    #[test]
    fn test_remove_top_level() {
        let forest = sample_forest();
        let remaining = remove_node(&forest, "and");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), "d");
    }

    #[test]
    fn test_remove_nested_leaves_empty_group() {
        let forest = sample_forest();
        let remaining = remove_node(&forest, "c");
        let not = find_node(&remaining, "not").unwrap();
        assert!(not.children().is_empty());
        assert_eq!(count_conditions(&remaining), 3);
    }

    #[test]
    fn test_remove_unknown_id() {
        let forest = sample_forest();
        assert_eq!(remove_node(&forest, "missing"), forest);
    }

    #[test]
    fn test_add_child_to_group() {
        let forest = sample_forest();
        let updated = add_child(&forest, "or", leaf("e", "e"));

        let group = find_node(&updated, "or").unwrap();
        assert_eq!(group.children().len(), 3);
        assert_eq!(group.children()[2].id(), "e");
        assert_eq!(count_conditions(&updated), count_conditions(&forest) + 1);
    }

    #[test]
    fn test_add_child_to_leaf_is_noop() {
        let forest = sample_forest();
        assert_eq!(add_child(&forest, "a", leaf("e", "e")), forest);
    }

    #[test]
    fn test_count_and_depth() {
        let forest = sample_forest();
        assert_eq!(count_conditions(&forest), 4);
        assert_eq!(depth(&forest), 4);
        assert_eq!(count_conditions(&[]), 0);
        assert_eq!(depth(&[]), 0);
    }
}
