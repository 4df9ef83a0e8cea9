//! Core functionality for lazycheck property-based testing.
//!
//! This crate provides the value-generation and shrinking machinery:
//! splittable random seeds, lazy pull-based sequences, lazy shrink trees,
//! the composable generator algebra, the per-trial generation context,
//! and the shrink-search loop that minimizes counterexamples.

pub mod context;
pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod seq;
pub mod shrink;
pub mod shrinkable;

// Re-export the main types
pub use context::*;
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use seq::*;
pub use shrink::*;
pub use shrinkable::*;
