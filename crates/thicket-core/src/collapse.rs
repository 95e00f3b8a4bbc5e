//! Eager resolution of every ambiguity in a forest.

use crate::transform::{Transform, transform};
use crate::tree::{AMBIG, Child, Token, Tree};

/// Materialize every resolved tree the forest encodes, in enumeration
/// order: ambiguity nodes concatenate their alternatives' resolutions,
/// ordinary nodes take the cartesian product of their children's
/// resolutions with the last child varying fastest.
///
/// The output length is the forest's derivation count, which grows
/// multiplicatively with nesting; this is the reference expansion, not a
/// lazy enumerator.
///
/// # Panics
///
/// Panics if an ambiguity node has a token alternative.
pub fn collapse_ambiguities(tree: &Tree) -> Vec<Tree> {
    transform(&mut Collapse, tree)
        .into_iter()
        .map(|resolved| match resolved {
            Child::Node(tree) => tree,
            Child::Token(_) => unreachable!("token resolution at forest root"),
        })
        .collect()
}

/// Folds each subtree into the list of its resolved forms.
struct Collapse;

impl Transform for Collapse {
    type Out = Vec<Child>;

    fn token(&mut self, token: &Token) -> Vec<Child> {
        vec![Child::Token(token.clone())]
    }

    fn node(&mut self, kind: &str, children: Vec<Vec<Child>>) -> Vec<Child> {
        if kind == AMBIG {
            children
                .into_iter()
                .flatten()
                .map(|resolved| match resolved {
                    Child::Node(_) => resolved,
                    Child::Token(_) => panic!("ambiguity node has a token alternative"),
                })
                .collect()
        } else {
            cartesian(children)
                .into_iter()
                .map(|combination| Child::Node(Tree::new(kind, combination)))
                .collect()
        }
    }
}

/// Eager cartesian product, last pool varying fastest.
fn cartesian(pools: Vec<Vec<Child>>) -> Vec<Vec<Child>> {
    let mut acc: Vec<Vec<Child>> = vec![Vec::new()];
    for pool in pools {
        let mut next = Vec::with_capacity(acc.len() * pool.len());
        for prefix in &acc {
            for item in &pool {
                let mut combination = prefix.clone();
                combination.push(item.clone());
                next.push(combination);
            }
        }
        acc = next;
    }
    acc
}
