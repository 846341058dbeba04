//! `fabgen build`: generate from a `fabgen.toml` project file.
//!
//! 1. Locate the project file (`--config`, else the current directory)
//! 2. Load and validate it via `fabgen_config`
//! 3. Resolve input paths against the project directory
//! 4. Run the same pipeline as `fabgen generate`

use std::path::{Path, PathBuf};

use fabgen_config::{load_config_file, resolve_build, ResolvedBuild, CONFIG_FILE_NAME};
use fabgen_diagnostics::DiagnosticSink;
use fabgen_engine::GenerateOptions;
use fabgen_spec::LoadOptions;
use fabgen_writers::{OutputFormat, WriterOptions};

use crate::pipeline::{self, InputPaths, OutputNaming, PinSizeOverride, RunRequest};
use crate::{BuildArgs, GlobalArgs, ReportFormat};

/// Runs the `fabgen build` command.
///
/// Configuration errors are returned as `Err`; generation failures are
/// reported as diagnostics with exit code 1.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config_path = locate_config(args.config.as_deref())?;
    let config = load_config_file(&config_path)?;
    let project_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let resolved = resolve_build(&config, &project_dir);

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Building {}", config_path.display());
    }

    let request = build_request(&resolved)?;
    let sink = DiagnosticSink::new();
    let result = pipeline::run_generation(&request, &sink);
    pipeline::finish(result, &sink, global, args.format)
}

/// Resolves `--config` to a file path. A directory means its
/// `fabgen.toml`; no flag means the current directory.
fn locate_config(flag: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = match flag {
        Some(p) if p.is_dir() => p.join(CONFIG_FILE_NAME),
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?.join(CONFIG_FILE_NAME),
    };
    if !path.is_file() {
        return Err(format!("could not find {}", path.display()).into());
    }
    Ok(path)
}

fn build_request(resolved: &ResolvedBuild) -> Result<RunRequest, Box<dyn std::error::Error>> {
    let formats = if resolved.formats.is_empty() {
        OutputFormat::ALL.to_vec()
    } else {
        OutputFormat::parse_list(&resolved.formats)?
    };
    Ok(RunRequest {
        inputs: InputPaths {
            technology: resolved.technology.clone(),
            tiles: resolved.tiles.clone(),
            fabric: resolved.fabric.clone(),
        },
        load: LoadOptions {
            strict: resolved.strict,
        },
        pin_size: resolved
            .pin_size
            .map(|(w, h)| PinSizeOverride::Microns(w, h)),
        generate: GenerateOptions {
            parallel: resolved.parallel,
        },
        naming: OutputNaming::Project {
            dir: resolved.output_dir.clone(),
            name: resolved.output_name.clone(),
        },
        formats,
        writer: WriterOptions {
            pin_layer: resolved.pin_layer.clone(),
        },
    })
}
