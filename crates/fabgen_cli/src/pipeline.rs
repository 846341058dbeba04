//! Shared pipeline helpers for CLI commands.
//!
//! Loading the three input documents, applying pin size overrides, running
//! the generator, naming and writing outputs, and rendering the collected
//! diagnostics. Used by `generate`, `check` and `build`.

use std::path::{Path, PathBuf};

use fabgen_common::FabricError;
use fabgen_diagnostics::{
    code, Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer,
};
use fabgen_engine::{generate_fabric, FabricLayout, GenerateOptions};
use fabgen_spec::{
    load_fabric_spec, load_tile_library, validate, FabricSpec, LoadOptions, PinSize, TileLibrary,
};
use fabgen_tech::{load_technology, Technology};
use fabgen_writers::{write_outputs, OutputFormat, WriterError, WriterOptions};

use crate::{GlobalArgs, InputArgs, ReportFormat};

/// A failure that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Loading, validation or generation failed.
    #[error(transparent)]
    Fabric(#[from] FabricError),
    /// Writing an output file failed.
    #[error(transparent)]
    Write(#[from] WriterError),
}

impl PipelineError {
    /// Converts the failure into an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PipelineError::Fabric(err) => Diagnostic::from(err),
            PipelineError::Write(err) => Diagnostic::error(code::IO_FAILURE, err.to_string()),
        }
    }
}

/// A pin size given on the command line or in `fabgen.toml`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinSizeOverride {
    /// Width and height in microns.
    Microns(f64, f64),
    /// Width and height in database units.
    DatabaseUnits(f64, f64),
}

impl PinSizeOverride {
    /// Builds an override from a two-element flag value.
    pub fn from_flags(microns: Option<&[f64]>, dbu: Option<&[f64]>) -> Option<Self> {
        match (microns, dbu) {
            (Some(&[w, h]), _) => Some(PinSizeOverride::Microns(w, h)),
            (None, Some(&[w, h])) => Some(PinSizeOverride::DatabaseUnits(w, h)),
            _ => None,
        }
    }

    /// Converts to microns using the technology distance scale.
    pub fn resolve(self, scale: u32) -> Result<PinSize, FabricError> {
        match self {
            PinSizeOverride::Microns(w, h) => PinSize::new(w, h),
            PinSizeOverride::DatabaseUnits(w, h) => {
                let scale = f64::from(scale);
                PinSize::new(w / scale, h / scale)
            }
        }
    }
}

/// Paths of the three input documents.
#[derive(Clone, Debug)]
pub struct InputPaths {
    /// Technology library.
    pub technology: PathBuf,
    /// Tile library.
    pub tiles: PathBuf,
    /// Fabric specification.
    pub fabric: PathBuf,
}

impl From<&InputArgs> for InputPaths {
    fn from(args: &InputArgs) -> Self {
        Self {
            technology: args.technology.clone(),
            tiles: args.tiles.clone(),
            fabric: args.fabric.clone(),
        }
    }
}

/// The parsed input documents.
pub struct LoadedInputs {
    /// Technology library.
    pub technology: Technology,
    /// Tile library.
    pub tiles: TileLibrary,
    /// Fabric specification, with any pin size override applied.
    pub spec: FabricSpec,
}

/// Loads all three documents and applies the pin size override.
pub fn load_inputs(
    paths: &InputPaths,
    options: LoadOptions,
    pin_size: Option<PinSizeOverride>,
    sink: &DiagnosticSink,
) -> Result<LoadedInputs, FabricError> {
    let technology = load_technology(&paths.technology, sink)?;
    let tiles = load_tile_library(&paths.tiles, sink)?;
    let mut spec = load_fabric_spec(&paths.fabric, options, sink)?;
    if let Some(size) = pin_size {
        let size = size.resolve(technology.units().distance)?;
        sink.emit(Diagnostic::note(
            code::STAGE_PROGRESS,
            format!(
                "overriding pin size: {:.3}x{:.3}um",
                size.width(),
                size.height()
            ),
        ));
        spec = spec.with_pin_size(size);
    }
    Ok(LoadedInputs {
        technology,
        tiles,
        spec,
    })
}

/// How the output directory and base name are chosen.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputNaming {
    /// `--output-dir` and `--output-name` as given on the command line.
    CommandLine {
        /// Output directory flag.
        dir: Option<PathBuf>,
        /// Output base name flag.
        name: Option<String>,
    },
    /// A project file: fixed directory, base name defaulting to the fabric.
    Project {
        /// Output directory.
        dir: PathBuf,
        /// Base name, if configured.
        name: Option<String>,
    },
}

impl OutputNaming {
    /// Returns the output directory and base name for `fabric_name`.
    pub fn resolve(&self, fabric_name: &str) -> (PathBuf, String) {
        match self {
            OutputNaming::CommandLine { dir, name } => {
                determine_output_paths(dir.as_deref(), name.as_deref(), fabric_name)
            }
            OutputNaming::Project { dir, name } => (
                dir.clone(),
                name.clone().unwrap_or_else(|| fabric_name.to_string()),
            ),
        }
    }
}

/// Applies the command-line output naming rules.
///
/// | dir | name | result |
/// |-----|------|--------|
/// | set | set  | `(dir, name)` |
/// | set | -    | `(dir, last component of dir)` |
/// | -   | set  | `(name, name)` |
/// | -   | -    | `(".", fabric name)` |
pub fn determine_output_paths(
    dir: Option<&Path>,
    name: Option<&str>,
    fabric_name: &str,
) -> (PathBuf, String) {
    match (dir, name) {
        (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_string()),
        (Some(dir), None) => {
            let base = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| fabric_name.to_string());
            (dir.to_path_buf(), base)
        }
        (None, Some(name)) => (PathBuf::from(name), name.to_string()),
        (None, None) => (PathBuf::from("."), fabric_name.to_string()),
    }
}

/// Everything a generation run needs.
pub struct RunRequest {
    /// Input documents.
    pub inputs: InputPaths,
    /// Loader options.
    pub load: LoadOptions,
    /// Pin size override.
    pub pin_size: Option<PinSizeOverride>,
    /// Engine options.
    pub generate: GenerateOptions,
    /// Output naming.
    pub naming: OutputNaming,
    /// Formats to write.
    pub formats: Vec<OutputFormat>,
    /// Writer options.
    pub writer: WriterOptions,
}

/// The result of a successful run.
pub struct Generated {
    /// The technology the fabric was built against.
    pub technology: Technology,
    /// The placed fabric.
    pub layout: FabricLayout,
    /// Directory the outputs went to.
    pub output_dir: PathBuf,
    /// Files written, in format order.
    pub written: Vec<PathBuf>,
}

/// Load, validate, generate and write.
///
/// Nothing is written unless generation succeeds.
pub fn run_generation(
    request: &RunRequest,
    sink: &DiagnosticSink,
) -> Result<Generated, PipelineError> {
    let inputs = load_inputs(&request.inputs, request.load, request.pin_size, sink)?;
    let validated = validate(&inputs.technology, &inputs.tiles, &inputs.spec, sink)?;
    let layout = generate_fabric(validated, &request.generate, sink)?;

    let (output_dir, base) = request.naming.resolve(inputs.spec.name());
    let written = write_outputs(
        &layout,
        &output_dir,
        &base,
        &request.formats,
        &request.writer,
    )?;
    for path in &written {
        sink.emit(Diagnostic::note(
            code::STAGE_PROGRESS,
            format!("wrote {}", path.display()),
        ));
    }

    Ok(Generated {
        technology: inputs.technology,
        layout,
        output_dir,
        written,
    })
}

/// Returns `true` if `diag` should be shown at the current verbosity.
pub fn is_visible(diag: &Diagnostic, global: &GlobalArgs) -> bool {
    global.verbosity() >= diag.min_verbosity()
}

/// Renders collected diagnostics to stderr as text.
///
/// In JSON mode nothing is printed here; the command prints one JSON
/// document at the end instead.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    global: &GlobalArgs,
    format: ReportFormat,
) {
    if format != ReportFormat::Text {
        return;
    }
    let renderer = TerminalRenderer::new(global.color, 80);
    for diag in diagnostics.iter().filter(|d| is_visible(d, global)) {
        eprintln!("{}", renderer.render(diag));
    }
}

/// Builds the JSON document printed in `--format json` mode.
pub fn json_report(
    success: bool,
    diagnostics: &[Diagnostic],
    written: &[PathBuf],
) -> serde_json::Value {
    serde_json::json!({
        "success": success,
        "diagnostics": diagnostics,
        "outputs": written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    })
}

/// Reports the outcome of a run and returns the exit code.
pub fn finish(
    result: Result<Generated, PipelineError>,
    sink: &DiagnosticSink,
    global: &GlobalArgs,
    format: ReportFormat,
) -> Result<i32, Box<dyn std::error::Error>> {
    let generated = match result {
        Ok(generated) => Some(generated),
        Err(err) => {
            sink.emit(err.to_diagnostic());
            None
        }
    };
    let diagnostics = sink.take_all();
    render_diagnostics(&diagnostics, global, format);

    match (&generated, format) {
        (Some(done), ReportFormat::Text) => {
            if !global.quiet {
                let summary = crate::summary::format_summary(
                    &done.layout,
                    &done.technology,
                    &done.output_dir,
                )?;
                print!("{summary}");
            }
        }
        (_, ReportFormat::Json) => {
            let written = generated.as_ref().map_or(&[][..], |g| &g.written[..]);
            let report = json_report(generated.is_some(), &diagnostics, written);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        (None, ReportFormat::Text) => {}
    }

    Ok(if generated.is_some() { 0 } else { 1 })
}


#[cfg(test)]
mod tests {
    use super::test_support::fixture;
    use super::*;

    fn quiet(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            color: false,
        }
    }

    fn request(naming: OutputNaming, formats: Vec<OutputFormat>) -> RunRequest {
        RunRequest {
            inputs: InputPaths {
                technology: fixture("tech.json"),
                tiles: fixture("tiles.json"),
                fabric: fixture("fabric.json"),
            },
            load: LoadOptions::default(),
            pin_size: None,
            generate: GenerateOptions::default(),
            naming,
            formats,
            writer: WriterOptions::default(),
        }
    }

    #[test]
    fn output_paths_dir_and_name() {
        assert_eq!(
            determine_output_paths(Some(Path::new("out/a")), Some("chip"), "fab"),
            (PathBuf::from("out/a"), "chip".to_string())
        );
    }

    #[test]
    fn output_paths_dir_only() {
        assert_eq!(
            determine_output_paths(Some(Path::new("out/a")), None, "fab"),
            (PathBuf::from("out/a"), "a".to_string())
        );
    }

    #[test]
    fn output_paths_name_only() {
        assert_eq!(
            determine_output_paths(None, Some("chip"), "fab"),
            (PathBuf::from("chip"), "chip".to_string())
        );
    }

    #[test]
    fn output_paths_neither() {
        assert_eq!(
            determine_output_paths(None, None, "fab"),
            (PathBuf::from("."), "fab".to_string())
        );
    }

    #[test]
    fn project_naming_defaults_to_fabric_name() {
        let naming = OutputNaming::Project {
            dir: PathBuf::from("build"),
            name: None,
        };
        assert_eq!(
            naming.resolve("fab"),
            (PathBuf::from("build"), "fab".to_string())
        );
    }

    #[test]
    fn pin_size_override_units() {
        let um = PinSizeOverride::Microns(2.0, 1.5).resolve(1000).unwrap();
        assert_eq!((um.width(), um.height()), (2.0, 1.5));
        let dbu = PinSizeOverride::DatabaseUnits(2000.0, 500.0)
            .resolve(1000)
            .unwrap();
        assert_eq!((dbu.width(), dbu.height()), (2.0, 0.5));
        assert!(PinSizeOverride::Microns(0.0, 1.0).resolve(1000).is_err());
    }

    #[test]
    fn pin_size_from_flags() {
        assert_eq!(
            PinSizeOverride::from_flags(Some(&[1.0, 2.0]), None),
            Some(PinSizeOverride::Microns(1.0, 2.0))
        );
        assert_eq!(
            PinSizeOverride::from_flags(None, Some(&[100.0, 200.0])),
            Some(PinSizeOverride::DatabaseUnits(100.0, 200.0))
        );
        assert_eq!(PinSizeOverride::from_flags(None, None), None);
    }

    #[test]
    fn visibility_follows_verbosity() {
        let progress = Diagnostic::note(code::STAGE_PROGRESS, "placed");
        let unknown = Diagnostic::note(code::UNKNOWN_FIELD, "ignored field");
        let warning = Diagnostic::warning(code::STRAY_PIN_POSITION, "stray");
        let error = Diagnostic::error(code::UNKNOWN_TILE, "missing");

        let normal = quiet(false, false);
        assert!(!is_visible(&progress, &normal));
        assert!(is_visible(&unknown, &normal));
        assert!(is_visible(&warning, &normal));

        let verbose = quiet(false, true);
        assert!(is_visible(&progress, &verbose));

        let silent = quiet(true, false);
        assert!(!is_visible(&warning, &silent));
        assert!(is_visible(&error, &silent));

        let both = quiet(true, true);
        assert!(!is_visible(&progress, &both));
        assert!(is_visible(&error, &both));
    }

    #[test]
    fn generation_writes_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("demo");
        let sink = DiagnosticSink::new();
        let generated = run_generation(
            &request(
                OutputNaming::CommandLine {
                    dir: Some(out.clone()),
                    name: None,
                },
                OutputFormat::ALL.to_vec(),
            ),
            &sink,
        )
        .unwrap();
        assert_eq!(generated.output_dir, out);
        assert_eq!(
            generated.written,
            vec![out.join("demo.def"), out.join("demo.lef"), out.join("demo.json")]
        );
        assert!(generated.written.iter().all(|p| p.exists()));
        assert_eq!(generated.layout.name, "demo_fabric");
    }

    #[test]
    fn pin_size_override_reaches_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(
            OutputNaming::Project {
                dir: dir.path().to_path_buf(),
                name: None,
            },
            vec![OutputFormat::Def],
        );
        req.pin_size = Some(PinSizeOverride::Microns(3.0, 2.0));
        let sink = DiagnosticSink::new();
        let generated = run_generation(&req, &sink).unwrap();
        assert!(generated
            .layout
            .pins
            .iter()
            .all(|p| p.width == 3.0 && p.height == 2.0));
        assert_eq!(generated.written, vec![dir.path().join("demo_fabric.def")]);
    }

    #[test]
    fn failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never");
        let mut req = request(
            OutputNaming::CommandLine {
                dir: Some(out.clone()),
                name: None,
            },
            OutputFormat::ALL.to_vec(),
        );
        req.inputs.tiles = dir.path().join("missing_tiles.json");
        let sink = DiagnosticSink::new();
        let err = run_generation(&req, &sink).err().unwrap();
        assert!(matches!(err, PipelineError::Fabric(FabricError::Io { .. })));
        assert!(!out.exists());
        assert_eq!(err.to_diagnostic().code, code::IO_FAILURE);
    }

    #[test]
    fn json_report_lists_outputs() {
        let report = json_report(true, &[], &[PathBuf::from("a.def")]);
        assert_eq!(report["success"], true);
        assert_eq!(report["outputs"][0], "a.def");
        assert!(report["diagnostics"].as_array().unwrap().is_empty());
    }
}
