#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parse forest data model for Thicket.
//!
//! Three layers:
//! - **Tree model**: [`Tree`], [`Child`], [`Token`], the reserved [`AMBIG`]
//!   tag, the [`tree!`] literal macro, and a JSON interchange form read by
//!   [`parse_forest`]
//! - **Transform machinery**: bottom-up folds over forests via [`Transform`],
//!   driven on an explicit stack
//! - **Collapse**: [`collapse_ambiguities`], the eager reference expansion
//!   of every ambiguity in a forest
//!
//! ```
//! use thicket_core::{collapse_ambiguities, tree};
//!
//! let forest = tree!("start", [tree!("_ambig", [tree!("a"), tree!("b")]), "X"]);
//! let resolved = collapse_ambiguities(&forest);
//! assert_eq!(resolved.len(), 2);
//! assert_eq!(resolved[0].to_string(), "(start (a) X)");
//! ```

mod collapse;
mod transform;
mod tree;

#[cfg(test)]
mod collapse_tests;

pub use collapse::collapse_ambiguities;
pub use transform::{Transform, transform};
pub use tree::{AMBIG, Child, Token, Tree, parse_forest};
