//! Depth extractor tests: tree form and linear form

use orgtree::util::testing::{init_test_setup, sample_store, synthetic_store};
use orgtree::{
    build_tree, extract_to_depth, extract_to_depth_linear, linear_depth, LinearStore,
    NodeId, NodeRecord, OrgTree, TreeError,
};

fn preorder_ids(tree: &OrgTree) -> Vec<u64> {
    tree.iter().map(|(_, n)| n.id().0).collect()
}

#[test]
fn given_level_one_when_extracting_tree_then_root_only_and_pruned() {
    // Arrange
    init_test_setup();
    let tree = build_tree(&sample_store()).unwrap();

    // Act
    let pruned = extract_to_depth(&tree, 1).unwrap();

    // Assert
    assert_eq!(pruned.node_count(), 1);
    let root = pruned.get_node(pruned.root().unwrap()).unwrap();
    assert_eq!(root.id(), NodeId(1));
    assert!(root.children.is_empty());
}

#[test]
fn given_level_two_when_extracting_tree_then_boundary_nodes_lose_children() {
    // Arrange: depth-2 sample tree, node 4 sits at level 3
    let tree = build_tree(&sample_store()).unwrap();

    // Act
    let pruned = extract_to_depth(&tree, 2).unwrap();

    // Assert: node 4 dropped, nodes 2 and 3 kept as leaves
    assert_eq!(preorder_ids(&pruned), vec![1, 2, 3]);
    assert_eq!(pruned.depth(), 1);
    for (_, node) in pruned.iter() {
        if node.id() != NodeId(1) {
            assert!(node.is_leaf());
        }
    }
}

#[test]
fn given_level_beyond_depth_when_extracting_tree_then_full_copy() {
    let tree = build_tree(&sample_store()).unwrap();

    let pruned = extract_to_depth(&tree, 10).unwrap();

    assert_eq!(preorder_ids(&pruned), preorder_ids(&tree));
}

#[test]
fn given_extracted_tree_when_extracting_again_then_identical() {
    // Idempotence at every level that matters for the sample tree
    let tree = build_tree(&sample_store()).unwrap();

    for level in 1..=3 {
        let once = extract_to_depth(&tree, level).unwrap();
        let twice = extract_to_depth(&once, level).unwrap();
        assert_eq!(preorder_ids(&once), preorder_ids(&twice));
        assert_eq!(once.depth(), twice.depth());
    }
}

#[test]
fn given_zero_level_when_extracting_then_invalid_argument() {
    let tree = build_tree(&sample_store()).unwrap();

    assert!(matches!(
        extract_to_depth(&tree, 0),
        Err(TreeError::InvalidArgument(_))
    ));
    assert!(matches!(
        extract_to_depth_linear(&sample_store(), 0, None),
        Err(TreeError::InvalidArgument(_))
    ));
}

#[test]
fn given_empty_tree_when_extracting_then_empty_tree() {
    // "No node" propagates instead of failing
    let pruned = extract_to_depth(&OrgTree::new(), 3).unwrap();

    assert!(pruned.is_empty());
}

#[test]
fn given_tree_when_extracting_then_input_not_mutated() {
    let tree = build_tree(&sample_store()).unwrap();
    let before = preorder_ids(&tree);

    let _ = extract_to_depth(&tree, 1).unwrap();

    assert_eq!(preorder_ids(&tree), before);
    assert_eq!(tree.depth(), 2);
}

#[test]
fn given_level_one_when_extracting_linear_then_root_record_only() {
    let store = sample_store();

    let extracted = extract_to_depth_linear(&store, 1, None).unwrap();

    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0], store.records()[0]);
}

#[test]
fn given_level_two_when_extracting_linear_then_depth_first_order() {
    let store = sample_store();

    let extracted = extract_to_depth_linear(&store, 2, None).unwrap();

    // Root first, then its children in store order; node 4 is too deep
    let ids: Vec<u64> = extracted.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn given_branching_store_when_extracting_linear_then_descendants_follow_parent() {
    //      1
    //     / \
    //    2   3
    //   /|   |
    //  4 5   6
    let store = LinearStore::new(vec![
        NodeRecord::root(1),
        NodeRecord::child(2, 1),
        NodeRecord::child(3, 1),
        NodeRecord::child(4, 2),
        NodeRecord::child(5, 2),
        NodeRecord::child(6, 3),
    ]);

    let extracted = extract_to_depth_linear(&store, 3, None).unwrap();

    let ids: Vec<u64> = extracted.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 3, 6]);
}

#[test]
fn given_mid_tree_parent_when_extracting_linear_then_subtree_records() {
    let store = sample_store();

    let extracted = extract_to_depth_linear(&store, 2, Some(NodeId(2))).unwrap();

    let ids: Vec<u64> = extracted.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![4]);
}

#[test]
fn given_unknown_parent_when_extracting_linear_then_empty() {
    let store = sample_store();

    let extracted = extract_to_depth_linear(&store, 3, Some(NodeId(999))).unwrap();

    assert!(extracted.is_empty());
}

#[test]
fn given_extracted_records_when_rebuilding_then_depth_capped_by_level() {
    // Extraction output is itself a valid store for every level
    let store = synthetic_store(200);

    for level in 1..=4 {
        let extracted =
            LinearStore::new(extract_to_depth_linear(&store, level, None).unwrap());
        let depth = linear_depth(&extracted, None).unwrap();
        assert!(depth <= level - 1, "level {level} gave depth {depth}");

        let tree = build_tree(&extracted).unwrap();
        assert_eq!(tree.depth(), depth);
    }
}

#[test]
fn given_extraction_when_comparing_forms_then_same_id_sets() {
    let store = synthetic_store(150);
    let tree = build_tree(&store).unwrap();

    for level in 1..=3 {
        let mut from_tree: Vec<u64> = extract_to_depth(&tree, level)
            .unwrap()
            .to_records()
            .iter()
            .map(|r| r.id.0)
            .collect();
        let mut from_store: Vec<u64> = extract_to_depth_linear(&store, level, None)
            .unwrap()
            .iter()
            .map(|r| r.id.0)
            .collect();
        from_tree.sort_unstable();
        from_store.sort_unstable();
        assert_eq!(from_tree, from_store);
    }
}
