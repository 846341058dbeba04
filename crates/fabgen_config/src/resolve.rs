//! Resolution of a parsed project file into concrete build settings.

use crate::types::ProjectConfig;
use std::path::{Path, PathBuf};

/// Build settings with every path anchored at the project directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBuild {
    /// Technology library path.
    pub technology: PathBuf,
    /// Tile library path.
    pub tiles: PathBuf,
    /// Fabric specification path.
    pub fabric: PathBuf,
    /// Output directory.
    pub output_dir: PathBuf,
    /// Output base name: `output.name`, else `project.name`, else `None`
    /// (the fabric name is used).
    pub output_name: Option<String>,
    /// Requested formats, lowercased. Empty means all.
    pub formats: Vec<String>,
    /// Layer carrying I/O pin shapes.
    pub pin_layer: String,
    /// Pin size override in microns.
    pub pin_size: Option<(f64, f64)>,
    /// Expand tiles in parallel.
    pub parallel: bool,
    /// Strict input checking.
    pub strict: bool,
}

/// Anchors relative paths at `project_dir` and picks the output base name.
///
/// Absolute paths in the file are kept as written.
pub fn resolve_build(config: &ProjectConfig, project_dir: &Path) -> ResolvedBuild {
    let anchor = |p: &str| project_dir.join(p);
    ResolvedBuild {
        technology: anchor(&config.inputs.technology),
        tiles: anchor(&config.inputs.tiles),
        fabric: anchor(&config.inputs.fabric),
        output_dir: anchor(&config.output.dir),
        output_name: config
            .output
            .name
            .clone()
            .or_else(|| config.project.name.clone()),
        formats: config
            .output
            .formats
            .iter()
            .map(|f| f.to_ascii_lowercase())
            .collect(),
        pin_layer: config.output.pin_layer.clone(),
        pin_size: config.io.pin_size.map(|[w, h]| (w, h)),
        parallel: config.engine.parallel,
        strict: config.engine.strict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_config_from_str;

    #[test]
    fn paths_are_anchored() {
        let config = load_config_from_str(
            r#"
[inputs]
technology = "lib/tech.json"
tiles = "tiles.json"
fabric = "/abs/fabric.json"

[output]
dir = "build"
"#,
        )
        .unwrap();
        let resolved = resolve_build(&config, Path::new("/proj"));
        assert_eq!(resolved.technology, PathBuf::from("/proj/lib/tech.json"));
        assert_eq!(resolved.tiles, PathBuf::from("/proj/tiles.json"));
        assert_eq!(resolved.fabric, PathBuf::from("/abs/fabric.json"));
        assert_eq!(resolved.output_dir, PathBuf::from("/proj/build"));
    }

    #[test]
    fn output_name_falls_back_to_project_name() {
        let base = "[inputs]\ntechnology = \"t\"\ntiles = \"t\"\nfabric = \"f\"\n";
        let config = load_config_from_str(&format!("[project]\nname = \"demo\"\n{base}")).unwrap();
        assert_eq!(
            resolve_build(&config, Path::new(".")).output_name.as_deref(),
            Some("demo")
        );

        let config = load_config_from_str(&format!(
            "[project]\nname = \"demo\"\n{base}[output]\nname = \"chip\"\n"
        ))
        .unwrap();
        assert_eq!(
            resolve_build(&config, Path::new(".")).output_name.as_deref(),
            Some("chip")
        );

        let config = load_config_from_str(base).unwrap();
        assert!(resolve_build(&config, Path::new(".")).output_name.is_none());
    }

    #[test]
    fn formats_lowercased_and_pin_size_converted() {
        let config = load_config_from_str(
            "[inputs]\ntechnology = \"t\"\ntiles = \"t\"\nfabric = \"f\"\n\
             [output]\nformats = \"DEF\"\n[io]\npin_size = [2.0, 1.5]\n",
        )
        .unwrap();
        let resolved = resolve_build(&config, Path::new("."));
        assert_eq!(resolved.formats, vec!["def"]);
        assert_eq!(resolved.pin_size, Some((2.0, 1.5)));
    }
}
