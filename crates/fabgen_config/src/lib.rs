//! Parsing and validation of `fabgen.toml` project files.
//!
//! A project file names the three input documents and the output settings
//! so a fabric can be rebuilt with `fabgen build`. [`resolve_build`] turns a
//! parsed [`ProjectConfig`] into absolute paths and concrete settings.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_build, ResolvedBuild};
pub use types::*;
