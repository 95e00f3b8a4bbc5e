//! Derivation counting.
//!
//! [`DerivationCounter`] walks a forest bottom-up and produces a
//! [`CountedTree`]: a parallel copy in which every node knows how many
//! distinct resolved trees it encodes. Ambiguity nodes add their
//! alternatives' counts, ordinary nodes multiply their children's, and
//! tokens count one. The annotation is what lets lazy enumeration skip
//! unambiguous subtrees and size its product factors without look-ahead.

use std::fmt;

use thicket_core::{AMBIG, Child, Token, Transform, Tree, transform};
use thiserror::Error;

/// Failures reported by the counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CountError {
    /// A sum or product of derivation counts exceeded `u64::MAX`.
    #[error("derivation count exceeds u64 range")]
    Overflow,
    /// The forest is nested deeper than the configured bound.
    #[error("forest height exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: u32 },
}

// ============================================================================
// Counted Forest
// ============================================================================

/// A forest node annotated with its derivation count.
///
/// Built only by [`DerivationCounter`] and immutable afterwards, so the
/// counts can never disagree with the structure they describe.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CountedTree {
    kind: String,
    children: Vec<CountedChild>,
    derivation_count: u64,
}

/// One annotated child slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum CountedChild {
    Node(CountedTree),
    Token(Token),
}

impl CountedTree {
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn children(&self) -> &[CountedChild] {
        &self.children
    }

    /// Number of distinct resolved trees this node encodes.
    #[inline]
    pub fn derivation_count(&self) -> u64 {
        self.derivation_count
    }

    /// Whether this node is an ambiguity node.
    #[inline]
    pub fn is_ambig(&self) -> bool {
        self.kind == AMBIG
    }

    /// Strip the annotations back off.
    pub fn to_tree(&self) -> Tree {
        Tree::new(
            self.kind.clone(),
            self.children.iter().map(CountedChild::to_child).collect(),
        )
    }
}

impl CountedChild {
    /// Derivation count of this slot; tokens count one.
    #[inline]
    pub fn derivation_count(&self) -> u64 {
        match self {
            CountedChild::Node(tree) => tree.derivation_count,
            CountedChild::Token(_) => 1,
        }
    }

    fn to_child(&self) -> Child {
        match self {
            CountedChild::Node(tree) => Child::Node(tree.to_tree()),
            CountedChild::Token(token) => Child::Token(token.clone()),
        }
    }
}

/// Same s-expression shape as [`Tree`], with `kind:count` on every node.
impl fmt::Display for CountedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{}", self.kind, self.derivation_count)?;
        for child in &self.children {
            match child {
                CountedChild::Node(tree) => write!(f, " {tree}")?,
                CountedChild::Token(token) => write!(f, " {token}")?,
            }
        }
        f.write_str(")")
    }
}

// ============================================================================
// Counting Pass
// ============================================================================

/// Counting pass configuration, builder style.
#[derive(Debug, Clone, Copy)]
pub struct DerivationCounter {
    max_depth: u32,
}

impl DerivationCounter {
    /// Default bound on forest height.
    pub const DEFAULT_MAX_DEPTH: u32 = 1024;

    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Cap the accepted forest height (nodes along the longest path).
    ///
    /// Enumerating a counted forest recurses once per level, so the bound
    /// set here is also the stack budget later enumeration may need.
    pub fn max_depth(mut self, limit: u32) -> Self {
        self.max_depth = limit;
        self
    }

    /// Annotate every node of `tree` with its derivation count.
    ///
    /// Visits each node exactly once, children before parents, and leaves
    /// the input untouched.
    pub fn count(&self, tree: &Tree) -> Result<CountedTree, CountError> {
        let mut fold = CountFold {
            max_depth: self.max_depth,
        };
        let (root, _) = transform(&mut fold, tree)?;
        match root {
            CountedChild::Node(counted) => Ok(counted),
            CountedChild::Token(_) => unreachable!("root folds to a node"),
        }
    }
}

impl Default for DerivationCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds each subtree into its annotated copy plus its height.
struct CountFold {
    max_depth: u32,
}

impl Transform for CountFold {
    type Out = Result<(CountedChild, u32), CountError>;

    fn token(&mut self, token: &Token) -> Self::Out {
        Ok((CountedChild::Token(token.clone()), 0))
    }

    fn node(&mut self, kind: &str, children: Vec<Self::Out>) -> Self::Out {
        let mut annotated = Vec::with_capacity(children.len());
        let mut height = 0;
        for child in children {
            let (child, child_height) = child?;
            height = height.max(child_height);
            annotated.push(child);
        }
        let height = height + 1;
        if height > self.max_depth {
            return Err(CountError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        let derivation_count = if kind == AMBIG {
            let mut total: u64 = 0;
            for child in &annotated {
                total = total
                    .checked_add(child.derivation_count())
                    .ok_or(CountError::Overflow)?;
            }
            total
        } else {
            let mut total: u64 = 1;
            for child in &annotated {
                total = total
                    .checked_mul(child.derivation_count())
                    .ok_or(CountError::Overflow)?;
            }
            total
        };

        Ok((
            CountedChild::Node(CountedTree {
                kind: kind.to_owned(),
                children: annotated,
                derivation_count,
            }),
            height,
        ))
    }
}
