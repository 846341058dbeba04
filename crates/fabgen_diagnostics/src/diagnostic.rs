//! Structured diagnostic messages with severity, codes, locations, and notes.

use crate::code::{self, Category, DiagnosticCode};
use crate::location::Location;
use crate::severity::{Severity, Verbosity};
use fabgen_common::FabricError;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message.
///
/// Each diagnostic includes:
/// - A severity level and unique code
/// - A primary message and an optional document location
/// - Optional notes and help text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The document field the diagnostic refers to, if any.
    pub location: Option<Location>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            location: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    /// Creates a new note diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message)
    }

    /// Attaches a document location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// The quietest [`Verbosity`] that still shows this diagnostic.
    ///
    /// Stage progress is only shown verbosely; otherwise the severity decides.
    pub fn min_verbosity(&self) -> Verbosity {
        match self.code.category {
            Category::Progress => Verbosity::Verbose,
            _ => self.severity.min_verbosity(),
        }
    }
}

impl From<&FabricError> for Diagnostic {
    fn from(err: &FabricError) -> Self {
        let code = match err {
            FabricError::Io { .. } => code::IO_FAILURE,
            FabricError::Parse { .. } => code::PARSE_FAILURE,
            FabricError::Malformed { .. } => code::MALFORMED_FIELD,
            FabricError::UnknownCellAlias { .. } => code::UNKNOWN_CELL_ALIAS,
            FabricError::UnknownCellName { .. } => code::UNKNOWN_CELL_NAME,
            FabricError::UnknownTile { .. } => code::UNKNOWN_TILE,
            FabricError::TileWidthMismatch { .. } => code::TILE_WIDTH_MISMATCH,
            FabricError::RegionOutOfBounds { .. } => code::REGION_OUT_OF_BOUNDS,
            FabricError::RegionOverlap { .. } => code::REGION_OVERLAP,
            FabricError::PinOutsideMargins { .. } => code::PIN_OUTSIDE_MARGINS,
            FabricError::Degenerate { .. } => code::DEGENERATE_DIMENSION,
        };
        let mut diag = Diagnostic::error(code, err.to_string());
        if let FabricError::Malformed {
            document, location, ..
        } = err
        {
            diag = diag.with_location(Location::new(*document, location.clone()));
        } else if let Some(document) = err.document() {
            diag = diag.with_location(Location::new(document, ""));
        }
        match err {
            FabricError::RegionOverlap { .. } => {
                diag.with_help("each tile of the array may belong to at most one region")
            }
            FabricError::PinOutsideMargins { .. } => {
                diag.with_help("manual pin positions are pin centers along the edge")
            }
            _ => diag,
        }
    }
}
