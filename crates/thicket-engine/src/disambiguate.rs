//! Enumeration of the resolved trees encoded by an ambiguous forest.
//!
//! Two entry points cover the two situations. [`resolutions`] walks a
//! plain [`Tree`] and materializes each subtree's resolutions as they are
//! first needed. [`CountedTree::resolutions`] uses derivation counts to
//! drive a fully lazy enumeration: unambiguous subtrees are copied
//! without being expanded and child streams are combined by
//! [`LazyProduct`], each consumed at most once.
//!
//! Both walk choices and combinations the same way: an ambiguity node
//! contributes its alternatives in turn, an ordinary node contributes
//! every combination of its children's resolutions with the last child
//! varying fastest. They diverge on one degenerate shape, a choice
//! buried inside a subtree that admits a single derivation: the counted
//! walk copies that subtree verbatim, wrapper included, while the plain
//! walk flattens every choice it reaches.

use std::slice;

use thicket_core::{Child, Token, Tree};

use crate::count::{CountedChild, CountedTree};
use crate::product::{EagerProduct, LazyProduct};

// ============================================================================
// Plain Enumeration
// ============================================================================

/// Enumerate every resolved tree of `tree`, in canonical order.
///
/// Subtree resolutions are collected per node the first time the node is
/// stepped, so a forest with heavily ambiguous subtrees is expanded
/// eagerly below each node. For large forests, count first and use
/// [`CountedTree::resolutions`] instead.
///
/// # Panics
///
/// Panics if an ambiguity node has a bare token among its alternatives.
pub fn resolutions(tree: &Tree) -> Resolutions<'_> {
    Resolutions::new(tree)
}

/// Iterator over the resolved trees of a plain forest.
pub struct Resolutions<'t> {
    state: PlainState<'t>,
}

enum PlainState<'t> {
    /// Ambiguity node: drain each alternative's resolutions in turn.
    Choice {
        alternatives: slice::Iter<'t, Child>,
        active: Option<Box<Resolutions<'t>>>,
    },
    /// Ordinary node: cartesian product of the children's resolutions,
    /// with the pools built on the first step.
    Product {
        tree: &'t Tree,
        product: Option<EagerProduct<Child>>,
    },
}

impl<'t> Resolutions<'t> {
    fn new(tree: &'t Tree) -> Self {
        let state = if tree.is_ambig() {
            PlainState::Choice {
                alternatives: tree.children.iter(),
                active: None,
            }
        } else {
            PlainState::Product {
                tree,
                product: None,
            }
        };
        Self { state }
    }
}

impl Iterator for Resolutions<'_> {
    type Item = Tree;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            PlainState::Choice {
                alternatives,
                active,
            } => loop {
                if let Some(stream) = active {
                    if let Some(tree) = stream.next() {
                        return Some(tree);
                    }
                    *active = None;
                }
                match alternatives.next()? {
                    Child::Node(alternative) => {
                        *active = Some(Box::new(Resolutions::new(alternative)));
                    }
                    Child::Token(_) => panic!("ambiguity node has a token alternative"),
                }
            },
            PlainState::Product { tree, product } => {
                let product = product.get_or_insert_with(|| {
                    let pools = tree
                        .children
                        .iter()
                        .map(|child| match child {
                            Child::Node(sub) => {
                                Resolutions::new(sub).map(Child::Node).collect()
                            }
                            Child::Token(token) => vec![Child::Token(token.clone())],
                        })
                        .collect();
                    EagerProduct::new(pools)
                });
                product
                    .next()
                    .map(|children| Tree::new(tree.kind.clone(), children))
            }
        }
    }
}

// ============================================================================
// Counted Enumeration
// ============================================================================

impl CountedTree {
    /// Enumerate every resolved tree, lazily, in canonical order.
    ///
    /// Matches [`resolutions`] on the plain forest choice for choice,
    /// but driven by the counts: a subtree with a single derivation is
    /// copied without being expanded, and everything else flows through
    /// [`LazyProduct`] with each child stream consumed at most once. The
    /// first resolutions of an astronomically ambiguous forest cost only
    /// the work of the paths they touch.
    ///
    /// # Panics
    ///
    /// Panics if an ambiguity node has a bare token among its
    /// alternatives.
    pub fn resolutions(&self) -> CountedResolutions<'_> {
        CountedResolutions::new(self)
    }
}

/// Iterator over the resolved trees of a counted forest.
pub struct CountedResolutions<'t> {
    state: CountedState<'t>,
}

enum CountedState<'t> {
    /// Exactly one derivation: yield the stripped tree once.
    Verbatim { tree: &'t CountedTree, done: bool },
    /// Ambiguity node: drain each alternative's resolutions in turn.
    Choice {
        alternatives: slice::Iter<'t, CountedChild>,
        active: Option<Box<CountedResolutions<'t>>>,
    },
    /// Ordinary node: lazy product of the child streams, counts as
    /// declared lengths.
    Product {
        kind: &'t str,
        product: LazyProduct<ChildStream<'t>>,
    },
}

impl<'t> CountedResolutions<'t> {
    fn new(tree: &'t CountedTree) -> Self {
        // An ambiguity node always flattens, even with one alternative
        // left; the node itself never appears in a resolution.
        let state = if tree.is_ambig() {
            CountedState::Choice {
                alternatives: tree.children().iter(),
                active: None,
            }
        } else if tree.derivation_count() == 1 {
            CountedState::Verbatim { tree, done: false }
        } else {
            let factors = tree
                .children()
                .iter()
                .map(|child| {
                    let length = child.derivation_count();
                    let stream = match child {
                        CountedChild::Node(sub) => ChildStream::Subtree(sub),
                        CountedChild::Token(token) => ChildStream::Token(Some(token)),
                    };
                    (stream, length)
                })
                .collect();
            CountedState::Product {
                kind: tree.kind(),
                product: LazyProduct::new(factors),
            }
        };
        Self { state }
    }
}

impl Iterator for CountedResolutions<'_> {
    type Item = Tree;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            CountedState::Verbatim { tree, done } => {
                if *done {
                    return None;
                }
                *done = true;
                Some(tree.to_tree())
            }
            CountedState::Choice {
                alternatives,
                active,
            } => loop {
                if let Some(stream) = active {
                    if let Some(tree) = stream.next() {
                        return Some(tree);
                    }
                    *active = None;
                }
                match alternatives.next()? {
                    CountedChild::Node(alternative) => {
                        *active = Some(Box::new(CountedResolutions::new(alternative)));
                    }
                    CountedChild::Token(_) => {
                        panic!("ambiguity node has a token alternative")
                    }
                }
            },
            CountedState::Product { kind, product } => product
                .next()
                .map(|children| Tree::new(*kind, children)),
        }
    }
}

// ============================================================================
// Child Streams
// ============================================================================

/// One child slot's resolutions, viewed as a stream of [`Child`] values.
///
/// Token slots hand out their token once; the product holds the element
/// for every repetition after that. Subtree slots defer building the
/// nested iterator until the product first pulls from them, which keeps
/// siblings of an empty stream from being touched at all.
enum ChildStream<'t> {
    Token(Option<&'t Token>),
    Subtree(&'t CountedTree),
    Active(Box<CountedResolutions<'t>>),
}

impl Iterator for ChildStream<'_> {
    type Item = Child;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self {
                ChildStream::Token(slot) => {
                    return slot.take().map(|token| Child::Token(token.clone()));
                }
                ChildStream::Subtree(tree) => {
                    let subtree = *tree;
                    *self = ChildStream::Active(Box::new(CountedResolutions::new(subtree)));
                }
                ChildStream::Active(stream) => return stream.next().map(Child::Node),
            }
        }
    }
}
