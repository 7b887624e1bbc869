//! Derived statistics: height, counts, balance, BST validity.

use rstest::rstest;

use bstviz::domain::{BinaryTree, Side, TreeStats};

#[test]
fn given_reference_values_when_computing_stats_then_match_expected() {
    let tree = BinaryTree::from_values(&[5, 3, 8, 1, 4, 7, 9]);

    assert_eq!(
        tree.stats(),
        TreeStats {
            height: 3,
            node_count: 7,
            leaf_count: 4,
            is_balanced: true,
            is_valid_bst: true,
        }
    );
    assert_eq!(tree.inorder_traversal().values, vec![1, 3, 4, 5, 7, 8, 9]);
}

#[rstest]
#[case(&[1, 2, 3], 3, 1, false)]
#[case(&[2, 1, 3], 2, 2, true)]
#[case(&[10, 5, 15, 3], 3, 2, true)]
#[case(&[10, 5, 3], 3, 1, false)]
#[case(&[42], 1, 1, true)]
fn given_insert_sequence_when_computing_stats_then_shape_metrics_match(
    #[case] values: &[i64],
    #[case] height: usize,
    #[case] leaves: usize,
    #[case] balanced: bool,
) {
    let stats = BinaryTree::from_values(values).stats();

    assert_eq!(stats.height, height);
    assert_eq!(stats.node_count, values.len());
    assert_eq!(stats.leaf_count, leaves);
    assert_eq!(stats.is_balanced, balanced);
    assert!(stats.is_valid_bst);
}

#[test]
fn given_deep_violation_when_checking_validity_then_inherited_bounds_catch_it() {
    // 6 sits in the left subtree of 5
    let mut tree = BinaryTree::from_values(&[5, 3]);
    tree.insert_manual(6, 3, Side::Right);

    assert!(!tree.stats().is_valid_bst);
}

#[test]
fn given_stats_when_tree_changes_then_recomputed() {
    let mut tree = BinaryTree::from_values(&[2, 1]);
    assert_eq!(tree.stats().node_count, 2);

    tree.insert(3);

    assert_eq!(tree.stats().node_count, 3);
    assert_eq!(tree.stats().leaf_count, 2);
}
