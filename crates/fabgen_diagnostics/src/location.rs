//! Points a diagnostic at a field inside one of the input documents.

use fabgen_common::DocumentKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted field path within an input document, e.g. `tiles[2].rows[0]`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The document the field lives in.
    pub document: DocumentKind,
    /// Dotted path to the field.
    pub path: String,
}

impl Location {
    /// Creates a location within `document`.
    pub fn new(document: DocumentKind, path: impl Into<String>) -> Self {
        Self {
            document,
            path: path.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.document)
        } else {
            write!(f, "{}: {}", self.document, self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_path() {
        let loc = Location::new(DocumentKind::FabricSpec, "io_ring.edges.north.pins[1]");
        assert_eq!(
            loc.to_string(),
            "fabric specification: io_ring.edges.north.pins[1]"
        );
    }

    #[test]
    fn display_document_only() {
        let loc = Location::new(DocumentKind::Technology, "");
        assert_eq!(loc.to_string(), "technology");
    }
}
