//! lazycheck property-based testing library.
//!
//! This is the main entry point for the lazycheck library, re-exporting
//! the generator, shrink-tree, and runner machinery from `lazycheck-core`.

pub use lazycheck_core::*;
