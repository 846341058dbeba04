//! Errors raised while reading a `fabgen.toml` project file.

use std::path::PathBuf;

/// A `fabgen.toml` that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The project file could not be read.
    #[error("cannot read project file '{}': {source}", path.display())]
    Read {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the project schema.
    #[error("invalid project file: {0}")]
    Syntax(String),

    /// A field that must be non-empty was left empty.
    #[error("project file field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// A field holds a value the generator cannot use.
    #[error("project file field '{field}' {message}")]
    InvalidValue {
        /// Dotted path of the field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
