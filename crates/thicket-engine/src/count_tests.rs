use thicket_core::{Tree, tree};

use crate::{CountError, CountedChild, CountedTree, DerivationCounter};

fn counted(tree: &Tree) -> CountedTree {
    DerivationCounter::new().count(tree).expect("count failed")
}

fn child_counts(tree: &CountedTree) -> Vec<u64> {
    tree.children()
        .iter()
        .map(CountedChild::derivation_count)
        .collect()
}

#[test]
fn unambiguous_forests_count_one() {
    let forest = tree!("start", ["A", tree!("b", ["B"]), tree!("c"), "D"]);
    let counted = counted(&forest);
    assert_eq!(counted.derivation_count(), 1);
    assert_eq!(child_counts(&counted), [1, 1, 1, 1]);
}

#[test]
fn childless_nodes_count_one() {
    assert_eq!(counted(&tree!("leaf")).derivation_count(), 1);
}

#[test]
fn top_level_alternatives_add() {
    let forest = Tree::ambig(vec![tree!("a", ["A"]), tree!("b", ["B"])]);
    let counted = counted(&forest);
    assert!(counted.is_ambig());
    assert_eq!(counted.derivation_count(), 2);
    assert_eq!(child_counts(&counted), [1, 1]);
}

#[test]
fn lower_level_ambiguity_propagates_upward() {
    let forest = tree!("start", [Tree::ambig(vec![tree!("a"), tree!("b")]), "X"]);
    let counted = counted(&forest);
    assert_eq!(counted.derivation_count(), 2);
    assert_eq!(child_counts(&counted), [2, 1]);
}

#[test]
fn sibling_counts_multiply() {
    let forest = tree!(
        "start",
        [
            Tree::ambig(vec![tree!("a"), tree!("b")]),
            Tree::ambig(vec![tree!("c"), tree!("d"), tree!("e")]),
            tree!("f"),
            Tree::ambig(vec![tree!("g"), tree!("h")]),
        ]
    );
    let counted = counted(&forest);
    assert_eq!(counted.derivation_count(), 12);
    assert_eq!(child_counts(&counted), [2, 3, 1, 2]);
}

#[test]
fn branch_counts_add_across_alternatives() {
    let forest = Tree::ambig(vec![
        tree!("x", [Tree::ambig(vec![tree!("a"), tree!("b"), tree!("c")])]),
        tree!("y", [Tree::ambig(vec![tree!("d"), tree!("e")])]),
    ]);
    let counted = counted(&forest);
    assert_eq!(counted.derivation_count(), 5);
    assert_eq!(child_counts(&counted), [3, 2]);
}

#[test]
fn deeply_nested_ambiguity_counts_through_every_level() {
    let ab = || Tree::ambig(vec![tree!("a"), tree!("b")]);
    let first = tree!(
        "x",
        [Tree::ambig(vec![
            tree!("u", [Tree::ambig(vec![tree!("a"), tree!("b"), tree!("c")])]),
            tree!("v", [ab(), Tree::ambig(vec![tree!("c"), tree!("d")])]),
        ])]
    );
    let second = tree!(
        "y",
        [
            ab(),
            Tree::ambig(vec![tree!("w", [ab()]), tree!("z", [ab()]), tree!("k")]),
        ]
    );
    let counted = counted(&Tree::ambig(vec![first, second]));
    assert_eq!(counted.derivation_count(), 17);
    assert_eq!(child_counts(&counted), [7, 10]);
}

#[test]
fn an_empty_choice_counts_zero() {
    let forest = tree!("start", [Tree::ambig(vec![]), "X"]);
    let counted = counted(&forest);
    assert_eq!(counted.derivation_count(), 0);
    assert_eq!(child_counts(&counted), [0, 1]);
}

#[test]
fn a_single_alternative_still_counts_its_subtree() {
    let forest = Tree::ambig(vec![tree!(
        "only",
        [Tree::ambig(vec![tree!("a"), tree!("b")])]
    )]);
    assert_eq!(counted(&forest).derivation_count(), 2);
}

#[test]
fn multiplied_counts_report_overflow() {
    let mut forest = tree!("leaf");
    for _ in 0..64 {
        forest = tree!("n", [forest, Tree::ambig(vec![tree!("a"), tree!("b")])]);
    }
    assert_eq!(
        DerivationCounter::new().count(&forest),
        Err(CountError::Overflow)
    );
}

#[test]
fn summed_counts_report_overflow() {
    let mut forest = tree!("leaf");
    for _ in 0..63 {
        forest = tree!("n", [forest, Tree::ambig(vec![tree!("a"), tree!("b")])]);
    }
    let forest = Tree::ambig(vec![forest.clone(), forest]);
    assert_eq!(
        DerivationCounter::new().count(&forest),
        Err(CountError::Overflow)
    );
}

#[test]
fn towering_forests_hit_the_depth_limit() {
    let mut forest = tree!("leaf");
    for _ in 0..2_000 {
        forest = tree!("n", [forest]);
    }
    assert_eq!(
        DerivationCounter::new().count(&forest),
        Err(CountError::DepthLimitExceeded { limit: 1024 })
    );
}

#[test]
fn max_depth_is_configurable() {
    let mut forest = tree!("leaf");
    for _ in 0..9 {
        forest = tree!("n", [forest]);
    }
    // Height ten: accepted at a limit of ten, rejected one below.
    assert!(DerivationCounter::new().max_depth(10).count(&forest).is_ok());
    assert_eq!(
        DerivationCounter::new().max_depth(9).count(&forest),
        Err(CountError::DepthLimitExceeded { limit: 9 })
    );
}

#[test]
fn counted_nodes_render_their_counts() {
    let forest = tree!("start", [Tree::ambig(vec![tree!("a"), tree!("b")]), "X"]);
    insta::assert_snapshot!(counted(&forest), @"(start:2 (_ambig:2 (a:1) (b:1)) X)");
}

#[test]
fn to_tree_strips_the_annotations() {
    let forest = tree!("start", [Tree::ambig(vec![tree!("a"), tree!("b")]), "X"]);
    assert_eq!(counted(&forest).to_tree(), forest);
}

#[test]
fn counted_trees_serialize_with_their_counts() {
    let forest = tree!("s", [Tree::ambig(vec![tree!("a"), tree!("b")]), "X"]);
    let value = serde_json::to_value(counted(&forest)).expect("counted tree serializes");
    assert_eq!(
        value,
        serde_json::json!({
            "kind": "s",
            "children": [
                {
                    "kind": "_ambig",
                    "children": [
                        { "kind": "a", "children": [], "derivation_count": 1 },
                        { "kind": "b", "children": [], "derivation_count": 1 },
                    ],
                    "derivation_count": 2,
                },
                "X",
            ],
            "derivation_count": 2,
        })
    );
}

#[test]
fn count_errors_render_readable_messages() {
    assert_eq!(
        CountError::Overflow.to_string(),
        "derivation count exceeds u64 range"
    );
    assert_eq!(
        CountError::DepthLimitExceeded { limit: 7 }.to_string(),
        "forest height exceeds the limit of 7"
    );
}
