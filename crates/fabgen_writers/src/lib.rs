//! Output writers for generated fabrics.
//!
//! Every writer renders a [`FabricLayout`] into a `String`; [`write_outputs`]
//! renders the requested formats first and only then touches the
//! filesystem, so a formatting failure never leaves partial output behind.

#![warn(missing_docs)]

pub mod def;
pub mod error;
pub mod format;
pub mod lef;
pub mod report;

pub use def::write_def;
pub use error::WriterError;
pub use format::OutputFormat;
pub use lef::write_lef;
pub use report::write_json_report;

use fabgen_engine::FabricLayout;
use std::path::{Path, PathBuf};

/// Pin layer used when none is configured.
pub const DEFAULT_PIN_LAYER: &str = "met5";

/// Options shared by the DEF and LEF writers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterOptions {
    /// Routing layer carrying the I/O pin shapes.
    pub pin_layer: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            pin_layer: DEFAULT_PIN_LAYER.to_string(),
        }
    }
}

/// Renders a single format.
pub fn render(
    layout: &FabricLayout,
    format: OutputFormat,
    options: &WriterOptions,
) -> Result<String, WriterError> {
    match format {
        OutputFormat::Def => write_def(layout, options),
        OutputFormat::Lef => write_lef(layout, options),
        OutputFormat::Json => write_json_report(layout),
    }
}

/// Writes `{dir}/{base}.{ext}` for each format and returns the paths in
/// format order.
///
/// `dir` is created if it does not exist.
pub fn write_outputs(
    layout: &FabricLayout,
    dir: &Path,
    base: &str,
    formats: &[OutputFormat],
    options: &WriterOptions,
) -> Result<Vec<PathBuf>, WriterError> {
    let rendered = formats
        .iter()
        .map(|&format| Ok((format, render(layout, format, options)?)))
        .collect::<Result<Vec<_>, WriterError>>()?;

    std::fs::create_dir_all(dir).map_err(|source| WriterError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(rendered.len());
    for (format, content) in rendered {
        let path = dir.join(format!("{base}.{}", format.extension()));
        std::fs::write(&path, content).map_err(|source| WriterError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}
