//! Trees, tokens, and the reserved ambiguity tag.
//!
//! A forest is an ordinary tree in which some nodes are ambiguity nodes:
//! their kind is [`AMBIG`] and their children are alternative derivations
//! of the same span rather than siblings. Every other kind tag is opaque
//! to the tooling built on top.

use std::fmt;

/// Reserved kind tag marking an ambiguity node.
pub const AMBIG: &str = "_ambig";

// ============================================================================
// Data Model
// ============================================================================

/// A parse tree node: a kind tag plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tree {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

/// One child slot: either a nested node or a terminal token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Child {
    Node(Tree),
    Token(Token),
}

/// A terminal leaf. Opaque text; nothing downstream looks inside.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token(pub String);

impl Tree {
    /// Build a node from a kind tag and children.
    pub fn new(kind: impl Into<String>, children: Vec<Child>) -> Self {
        Self {
            kind: kind.into(),
            children,
        }
    }

    /// Wrap alternative derivations of the same span in an ambiguity node.
    pub fn ambig(alternatives: Vec<Tree>) -> Self {
        Self::new(AMBIG, alternatives.into_iter().map(Child::Node).collect())
    }

    /// Whether this node is an ambiguity node.
    #[inline]
    pub fn is_ambig(&self) -> bool {
        self.kind == AMBIG
    }
}

impl From<Tree> for Child {
    fn from(tree: Tree) -> Self {
        Child::Node(tree)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Token(token)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Token(Token(text.to_owned()))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Token(Token(text))
    }
}

// ============================================================================
// Display
// ============================================================================

/// Compact s-expression rendering for diagnostics and snapshots: tokens
/// print verbatim, nodes as `(kind child ...)`. Not a parseable syntax;
/// kind tags and token text are not escaped.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.kind)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(tree) => tree.fmt(f),
            Child::Token(token) => token.fmt(f),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Interchange
// ============================================================================

/// Parse the JSON interchange form of a forest.
///
/// A node is an object with a `kind` and an optional `children` array; a
/// token is a bare string:
///
/// ```json
/// {"kind": "start", "children": ["A", {"kind": "b", "children": ["B"]}]}
/// ```
pub fn parse_forest(json: &str) -> Result<Tree, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Construction Macro
// ============================================================================

/// Build a tree literal. String children become tokens, nested `tree!`
/// calls become subtrees.
///
/// ```
/// use thicket_core::tree;
///
/// let t = tree!("start", ["A", tree!("b", ["B"]), tree!("c")]);
/// assert_eq!(t.to_string(), "(start A (b B) (c))");
/// ```
#[macro_export]
macro_rules! tree {
    ($kind:expr) => {
        $crate::Tree::new($kind, ::std::vec::Vec::new())
    };
    ($kind:expr, [$($child:expr),* $(,)?]) => {
        $crate::Tree::new($kind, ::std::vec![$($crate::Child::from($child)),*])
    };
}
