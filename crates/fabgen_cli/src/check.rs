//! `fabgen check`: load and validate the inputs without generating.

use fabgen_diagnostics::{DiagnosticSink, Severity};
use fabgen_spec::{validate, LoadOptions};

use crate::pipeline::{self, InputPaths};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `fabgen check` command.
///
/// Returns exit code 0 if the inputs are consistent, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let paths = InputPaths::from(&args.inputs);
    let sink = DiagnosticSink::new();

    let outcome = pipeline::load_inputs(
        &paths,
        LoadOptions {
            strict: args.strict,
        },
        None,
        &sink,
    )
    .and_then(|inputs| {
        validate(&inputs.technology, &inputs.tiles, &inputs.spec, &sink)?;
        Ok(inputs.spec.name().to_string())
    });
    if let Err(ref err) = outcome {
        sink.emit(fabgen_diagnostics::Diagnostic::from(err));
    }

    let diagnostics = sink.take_all();
    pipeline::render_diagnostics(&diagnostics, global, args.format);

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                if let Ok(name) = &outcome {
                    eprintln!("   Checked {name}");
                }
                eprintln!("   Result: {errors} error(s), {warnings} warning(s)");
            }
        }
        ReportFormat::Json => {
            let report = pipeline::json_report(outcome.is_ok(), &diagnostics, &[]);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if outcome.is_ok() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::fixture;
    use crate::InputArgs;

    fn args(fabric: std::path::PathBuf) -> CheckArgs {
        CheckArgs {
            inputs: InputArgs {
                technology: fixture("tech.json"),
                tiles: fixture("tiles.json"),
                fabric,
            },
            format: ReportFormat::Text,
            strict: false,
        }
    }

    fn silent() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
        }
    }

    #[test]
    fn fixture_checks_clean() {
        assert_eq!(run(&args(fixture("fabric.json")), &silent()).unwrap(), 0);
    }

    #[test]
    fn unknown_default_tile_fails() {
        let dir = tempfile::tempdir().unwrap();
        let fabric = dir.path().join("fabric.json");
        std::fs::write(
            &fabric,
            r#"{
                "name": "bad",
                "array_dimensions": { "rows": 1, "cols": 1 },
                "tile_configuration": { "default_tile": "ghost" }
            }"#,
        )
        .unwrap();
        assert_eq!(run(&args(fabric), &silent()).unwrap(), 1);
    }
}
