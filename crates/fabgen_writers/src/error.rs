//! Errors raised while rendering or writing output files.

use std::path::PathBuf;

/// Errors that can occur while producing output files.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// An output file or directory could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON report could not be encoded.
    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// Text formatting failed.
    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    /// An output format name was not recognized.
    #[error("unknown output format '{0}' (expected def, lef, json or all)")]
    UnknownFormat(String),
}
