//! # EquipDB Testkit
//!
//! Test utilities for EquipDB.
//!
//! This crate provides:
//! - Test fixtures backed by temporary directories
//! - Property-based test generators using proptest
//! - A reference model to check the store against
//!
//! ## Usage
//!
//! ```rust,ignore
//! use equipdb_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_store() {
//!     with_temp_store(|store| {
//!         store.create(sample_fields("Ventilator")).unwrap();
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
