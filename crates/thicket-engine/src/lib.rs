#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Derivation counting and lazy disambiguation for ambiguous parse forests.
//!
//! An ambiguous forest packs many parse trees into one: wherever the
//! grammar admits several readings of a span, an `_ambig` node holds the
//! alternatives side by side. This crate answers two questions about such
//! a forest without materializing it:
//!
//! - **How many** resolved trees does it encode? [`DerivationCounter`]
//!   annotates every node with its derivation count in one bottom-up pass.
//! - **Which ones?** [`resolutions`] and [`CountedTree::resolutions`]
//!   enumerate the resolved trees lazily, in a stable order, consuming no
//!   more of the forest than the requested prefix needs.
//!
//! ```
//! use thicket_core::tree;
//! use thicket_engine::DerivationCounter;
//!
//! let forest = tree!("start", [tree!("_ambig", [tree!("a"), tree!("b")]), "X"]);
//! let counted = DerivationCounter::new().count(&forest)?;
//! assert_eq!(counted.derivation_count(), 2);
//!
//! let first = counted.resolutions().next().unwrap();
//! assert_eq!(first.to_string(), "(start (a) X)");
//! # Ok::<(), thicket_engine::CountError>(())
//! ```

mod count;
mod disambiguate;
mod product;

#[cfg(test)]
mod count_tests;

pub use count::{CountError, CountedChild, CountedTree, DerivationCounter};
pub use disambiguate::{CountedResolutions, Resolutions, resolutions};
pub use product::{EagerProduct, LazyProduct};
