//! # Libris Testkit
//!
//! Test utilities for Libris.
//!
//! This crate provides:
//! - Test fixtures: libraries on a manual clock with a scratch directory
//! - Property-based test generators using proptest
//! - Cross-module invariant checks and an operation replayer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use libris_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_library() {
//!     with_temp_library(|lib| {
//!         lib.add_item(sample_items().remove(0));
//!         check_invariants(lib).unwrap();
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
