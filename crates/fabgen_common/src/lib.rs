//! Shared foundational types used across the fabgen fabric generator.
//!
//! This crate provides the input document vocabulary, the user-facing
//! [`FabricError`] taxonomy, content hashing for layout fingerprints,
//! database-unit conversion, and the internal result type.

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod hash;
pub mod result;
pub mod units;

pub use document::DocumentKind;
pub use error::{ErrorKind, FabricError};
pub use hash::{ContentHash, HashBuilder};
pub use result::{FabResult, InternalError};
pub use units::{to_dbu, DEFAULT_UNIT_SCALE};
