//! Technology catalog for the target manufacturing process.
//!
//! A [`Technology`] describes the placement site, metal layers, unit scales,
//! and every standard cell a fabric may instantiate. Cells are looked up by
//! their short alias (as written in tile rows) and reverse-looked-up by their
//! full library name (as written into placed instances).
//!
//! Technologies are loaded from JSON with [`load_technology`] and are
//! immutable once constructed.

#![warn(missing_docs)]

pub mod ids;
pub mod loader;
pub mod technology;
pub mod types;

mod raw;

pub use ids::CellId;
pub use loader::{load_technology, load_technology_from_str};
pub use technology::Technology;
pub use types::{
    CellCategory, CellDefinition, CellPin, LayerDirection, LayerInfo, PinDirection, PowerInfo,
    Site, Units,
};
