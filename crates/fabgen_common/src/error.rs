//! User-facing error taxonomy for fabric generation.
//!
//! Every structural problem in the input documents aborts the run with a
//! [`FabricError`]. Each variant carries the offending names together with the
//! expected and actual values, and [`FabricError::kind`] classifies it.

use crate::document::DocumentKind;
use std::fmt;
use std::path::PathBuf;

/// Broad classification of a [`FabricError`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// An input document could not be read from disk.
    Io,
    /// A required field is absent or has the wrong shape.
    InputMalformed,
    /// A tile, cell alias, or region target names an entity absent from its catalog.
    MissingReference,
    /// Tile row widths disagree, a region violates bounds or overlap, or a
    /// manual pin falls outside the margins.
    GeometricInconsistency,
    /// Margins or array dimensions are non-positive.
    ComputedDegenerate,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::InputMalformed => write!(f, "input malformed"),
            ErrorKind::MissingReference => write!(f, "missing reference"),
            ErrorKind::GeometricInconsistency => write!(f, "geometric inconsistency"),
            ErrorKind::ComputedDegenerate => write!(f, "computed degenerate"),
        }
    }
}

/// Errors that abort a fabric generation run.
#[derive(Debug, thiserror::Error)]
pub enum FabricError {
    /// An input document could not be read.
    #[error("failed to read {document} '{}': {source}", path.display())]
    Io {
        /// The document being read.
        document: DocumentKind,
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input document is not well-formed JSON or misses a required field.
    #[error("failed to parse {document}: {message}")]
    Parse {
        /// The document being parsed.
        document: DocumentKind,
        /// The parser's description of the problem.
        message: String,
    },

    /// A field is present but its value is not acceptable.
    #[error("invalid {document} at '{location}': {message}")]
    Malformed {
        /// The document containing the field.
        document: DocumentKind,
        /// Dotted path to the offending field.
        location: String,
        /// What is wrong with the value.
        message: String,
    },

    /// A cell alias is not defined in the technology.
    #[error("unknown cell alias '{alias}' referenced by {referrer}")]
    UnknownCellAlias {
        /// The alias that could not be resolved.
        alias: String,
        /// Who referenced it (tile, edge side, ...).
        referrer: String,
    },

    /// A cell name has no alias in the technology.
    #[error("unknown cell type '{name}'")]
    UnknownCellName {
        /// The cell name that could not be resolved.
        name: String,
    },

    /// A tile type is not defined in the tile library.
    #[error("tile type '{tile}' referenced by {referrer} not found in tile library")]
    UnknownTile {
        /// The missing tile name.
        tile: String,
        /// Who referenced it (default tile, region, ...).
        referrer: String,
    },

    /// A tile's rows do not agree with its declared width or with each other.
    #[error("{message}")]
    TileWidthMismatch {
        /// The offending tile.
        tile: String,
        /// Full description including the per-row breakdown.
        message: String,
    },

    /// A region rectangle extends past the tile array.
    #[error(
        "Region '{region}' extends beyond fabric boundaries \
         (rows {row_start}..{row_end}, cols {col_start}..{col_end} in a {rows}x{cols} array)"
    )]
    RegionOutOfBounds {
        /// The offending region.
        region: String,
        /// First row covered by the region.
        row_start: u32,
        /// One past the last row covered by the region.
        row_end: u32,
        /// First column covered by the region.
        col_start: u32,
        /// One past the last column covered by the region.
        col_end: u32,
        /// Tile array rows.
        rows: u32,
        /// Tile array columns.
        cols: u32,
    },

    /// Two regions cover a common tile.
    #[error("Regions '{first}' and '{second}' overlap")]
    RegionOverlap {
        /// The region declared first.
        first: String,
        /// The region declared second.
        second: String,
    },

    /// A manually positioned pin does not fit inside the margin band.
    #[error(
        "Pin {pin} extends outside margin boundaries on the {edge} edge \
         ({start:.3}..{end:.3} is not within {min:.3}..{max:.3})"
    )]
    PinOutsideMargins {
        /// The offending pin.
        pin: String,
        /// The I/O edge it sits on.
        edge: String,
        /// Lower coordinate of the pin along the edge.
        start: f64,
        /// Upper coordinate of the pin along the edge.
        end: f64,
        /// Lower bound of the margin band.
        min: f64,
        /// Upper bound of the margin band.
        max: f64,
    },

    /// A dimension that must be positive is zero or negative.
    #[error("{field} must be positive, got {value}")]
    Degenerate {
        /// Dotted path of the offending field.
        field: String,
        /// The rejected value, formatted.
        value: String,
    },
}

impl FabricError {
    /// Classifies this error into the generation error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FabricError::Io { .. } => ErrorKind::Io,
            FabricError::Parse { .. } | FabricError::Malformed { .. } => {
                ErrorKind::InputMalformed
            }
            FabricError::UnknownCellAlias { .. }
            | FabricError::UnknownCellName { .. }
            | FabricError::UnknownTile { .. } => ErrorKind::MissingReference,
            FabricError::TileWidthMismatch { .. }
            | FabricError::RegionOutOfBounds { .. }
            | FabricError::RegionOverlap { .. }
            | FabricError::PinOutsideMargins { .. } => ErrorKind::GeometricInconsistency,
            FabricError::Degenerate { .. } => ErrorKind::ComputedDegenerate,
        }
    }

    /// Returns the document the error was found in, when it is attributable to one.
    pub fn document(&self) -> Option<DocumentKind> {
        match self {
            FabricError::Io { document, .. }
            | FabricError::Parse { document, .. }
            | FabricError::Malformed { document, .. } => Some(*document),
            FabricError::TileWidthMismatch { .. } => Some(DocumentKind::TileLibrary),
            FabricError::UnknownCellName { .. } => Some(DocumentKind::Technology),
            FabricError::UnknownTile { .. }
            | FabricError::RegionOutOfBounds { .. }
            | FabricError::RegionOverlap { .. }
            | FabricError::PinOutsideMargins { .. }
            | FabricError::Degenerate { .. } => Some(DocumentKind::FabricSpec),
            FabricError::UnknownCellAlias { .. } => None,
        }
    }

    /// Shorthand for a [`FabricError::Malformed`] error.
    pub fn malformed(
        document: DocumentKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FabricError::Malformed {
            document,
            location: location.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`FabricError::Degenerate`] error.
    pub fn degenerate(field: impl Into<String>, value: impl fmt::Display) -> Self {
        FabricError::Degenerate {
            field: field.into(),
            value: value.to_string(),
        }
    }
}
