//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "fabgen.toml";

const KNOWN_FORMATS: [&str; 4] = ["def", "lef", "json", "all"];

/// Loads and validates `fabgen.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::Syntax(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are usable.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    let inputs = [
        ("inputs.technology", &config.inputs.technology),
        ("inputs.tiles", &config.inputs.tiles),
        ("inputs.fabric", &config.inputs.fabric),
    ];
    for (field, value) in inputs {
        if value.is_empty() {
            return Err(ConfigError::EmptyField(field));
        }
    }

    for format in &config.output.formats {
        if !KNOWN_FORMATS.contains(&format.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "output.formats",
                message: format!(
                    "contains unknown format '{format}' (expected def, lef, json or all)"
                ),
            });
        }
    }

    if config.output.pin_layer.is_empty() {
        return Err(ConfigError::EmptyField("output.pin_layer"));
    }

    if let Some([width, height]) = config.io.pin_size {
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "io.pin_size",
                message: format!("must be positive, got [{width}, {height}]"),
            });
        }
    }
    Ok(())
}
