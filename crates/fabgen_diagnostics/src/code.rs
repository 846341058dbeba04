//! Diagnostic codes with category prefixes for structured identification.
//!
//! The constants at the bottom of this module are the complete set of codes
//! the generator emits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Input document shape problems, prefixed with `I`.
    Input,
    /// Dangling cross-references, prefixed with `R`.
    Reference,
    /// Geometric inconsistencies, prefixed with `G`.
    Geometry,
    /// Non-positive dimensions, prefixed with `D`.
    Degenerate,
    /// Stage progress reports, prefixed with `P`.
    Progress,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Input => 'I',
            Category::Reference => 'R',
            Category::Geometry => 'G',
            Category::Degenerate => 'D',
            Category::Progress => 'P',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit number,
/// e.g., `I101`, `G303`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// An input document could not be read.
pub const IO_FAILURE: DiagnosticCode = DiagnosticCode::new(Category::Input, 100);
/// An input document is not valid JSON or lacks a required field.
pub const PARSE_FAILURE: DiagnosticCode = DiagnosticCode::new(Category::Input, 101);
/// A field value is not acceptable.
pub const MALFORMED_FIELD: DiagnosticCode = DiagnosticCode::new(Category::Input, 102);
/// Unrecognized fields were ignored.
pub const UNKNOWN_FIELD: DiagnosticCode = DiagnosticCode::new(Category::Input, 103);
/// An auto-spaced pin declared a position.
pub const STRAY_PIN_POSITION: DiagnosticCode = DiagnosticCode::new(Category::Input, 104);
/// The power distribution section was unusable and treated as absent.
pub const POWER_DISTRIBUTION_IGNORED: DiagnosticCode = DiagnosticCode::new(Category::Input, 105);
/// A cell alias is not in the technology.
pub const UNKNOWN_CELL_ALIAS: DiagnosticCode = DiagnosticCode::new(Category::Reference, 201);
/// A cell name is not in the technology.
pub const UNKNOWN_CELL_NAME: DiagnosticCode = DiagnosticCode::new(Category::Reference, 202);
/// A tile type is not in the tile library.
pub const UNKNOWN_TILE: DiagnosticCode = DiagnosticCode::new(Category::Reference, 203);
/// Tile rows disagree on width.
pub const TILE_WIDTH_MISMATCH: DiagnosticCode = DiagnosticCode::new(Category::Geometry, 301);
/// A region extends past the tile array.
pub const REGION_OUT_OF_BOUNDS: DiagnosticCode = DiagnosticCode::new(Category::Geometry, 302);
/// Two regions overlap.
pub const REGION_OVERLAP: DiagnosticCode = DiagnosticCode::new(Category::Geometry, 303);
/// A manual pin lies outside the margin band.
pub const PIN_OUTSIDE_MARGINS: DiagnosticCode = DiagnosticCode::new(Category::Geometry, 304);
/// A region tile has a different footprint than the default tile.
pub const REGION_FOOTPRINT_MISMATCH: DiagnosticCode =
    DiagnosticCode::new(Category::Geometry, 305);
/// A dimension is zero or negative.
pub const DEGENERATE_DIMENSION: DiagnosticCode = DiagnosticCode::new(Category::Degenerate, 401);
/// A generation stage finished.
pub const STAGE_PROGRESS: DiagnosticCode = DiagnosticCode::new(Category::Progress, 501);
