//! Identifies which of the three input documents a value or problem belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the declarative input documents consumed by the generator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// The technology catalog (site, layers, units, cell definitions).
    Technology,
    /// The tile library (reusable row templates).
    TileLibrary,
    /// The top-level fabric specification.
    FabricSpec,
}

impl DocumentKind {
    /// Returns all document kinds in load order.
    pub fn all() -> &'static [DocumentKind] {
        &[
            DocumentKind::Technology,
            DocumentKind::TileLibrary,
            DocumentKind::FabricSpec,
        ]
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Technology => write!(f, "technology"),
            DocumentKind::TileLibrary => write!(f, "tile library"),
            DocumentKind::FabricSpec => write!(f, "fabric specification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(DocumentKind::Technology.to_string(), "technology");
        assert_eq!(DocumentKind::TileLibrary.to_string(), "tile library");
        assert_eq!(DocumentKind::FabricSpec.to_string(), "fabric specification");
    }

    #[test]
    fn load_order() {
        assert_eq!(DocumentKind::all().len(), 3);
        assert_eq!(DocumentKind::all()[0], DocumentKind::Technology);
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&DocumentKind::FabricSpec).unwrap();
        assert_eq!(json, "\"fabric_spec\"");
    }
}
