use crate::collapse::collapse_ambiguities;
use crate::tree;
use crate::tree::Tree;

fn rendered(forest: &Tree) -> Vec<String> {
    collapse_ambiguities(forest)
        .iter()
        .map(Tree::to_string)
        .collect()
}

#[test]
fn unambiguous_trees_collapse_to_themselves() {
    let tree = tree!("start", ["A", tree!("b", ["B"]), tree!("c"), "D"]);
    assert_eq!(collapse_ambiguities(&tree), vec![tree.clone()]);
}

#[test]
fn top_level_alternatives_stay_in_order() {
    let forest = Tree::ambig(vec![tree!("start", ["a"]), tree!("start", ["b"])]);
    assert_eq!(
        collapse_ambiguities(&forest),
        vec![tree!("start", ["a"]), tree!("start", ["b"])]
    );
}

#[test]
fn nested_choices_expand_within_the_parent() {
    let forest = tree!("start", [tree!("_ambig", [tree!("a"), tree!("b")])]);
    assert_eq!(
        collapse_ambiguities(&forest),
        vec![tree!("start", [tree!("a")]), tree!("start", [tree!("b")])]
    );
}

#[test]
fn products_vary_the_last_child_fastest() {
    let forest = tree!(
        "pair",
        [
            tree!("_ambig", [tree!("x"), tree!("y")]),
            tree!("_ambig", [tree!("1"), tree!("2")]),
        ]
    );
    assert_eq!(
        rendered(&forest),
        ["(pair (x) (1))", "(pair (x) (2))", "(pair (y) (1))", "(pair (y) (2))"]
    );
}

#[test]
fn branch_resolutions_concatenate_across_alternatives() {
    let forest = Tree::ambig(vec![
        tree!("s", [tree!("_ambig", [tree!("a"), tree!("b"), tree!("c")]), "F"]),
        tree!("s", [tree!("_ambig", [tree!("d"), tree!("e")]), "G"]),
    ]);
    assert_eq!(
        rendered(&forest),
        ["(s (a) F)", "(s (b) F)", "(s (c) F)", "(s (d) G)", "(s (e) G)"]
    );
}

#[test]
fn empty_choices_produce_no_resolutions() {
    let forest = tree!("start", [tree!("_ambig"), "X"]);
    assert_eq!(collapse_ambiguities(&forest), Vec::<Tree>::new());
}

#[test]
#[should_panic(expected = "token alternative")]
fn token_alternatives_are_rejected() {
    let forest = tree!("start", [tree!("_ambig", ["X", tree!("a")])]);
    collapse_ambiguities(&forest);
}
