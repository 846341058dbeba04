//! `fabgen generate`: build a fabric from three documents on the command
//! line.

use fabgen_diagnostics::DiagnosticSink;
use fabgen_engine::GenerateOptions;
use fabgen_spec::LoadOptions;
use fabgen_writers::{OutputFormat, WriterOptions};

use crate::pipeline::{self, InputPaths, OutputNaming, PinSizeOverride, RunRequest};
use crate::{GenerateArgs, GlobalArgs};

/// Runs the `fabgen generate` command.
///
/// Returns exit code 0 on success and 1 if any stage failed. No output file
/// is written on failure.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let request = build_request(args);
    if !global.quiet && args.format == crate::ReportFormat::Text {
        eprintln!("   Generating {}", args.inputs.fabric.display());
    }
    let sink = DiagnosticSink::new();
    let result = pipeline::run_generation(&request, &sink);
    pipeline::finish(result, &sink, global, args.format)
}

fn build_request(args: &GenerateArgs) -> RunRequest {
    let formats = if args.def_only {
        vec![OutputFormat::Def]
    } else {
        OutputFormat::ALL.to_vec()
    };
    RunRequest {
        inputs: InputPaths::from(&args.inputs),
        load: LoadOptions {
            strict: args.strict,
        },
        pin_size: PinSizeOverride::from_flags(
            args.pin_size.as_deref(),
            args.pin_size_dbu.as_deref(),
        ),
        generate: GenerateOptions {
            parallel: args.parallel,
        },
        naming: OutputNaming::CommandLine {
            dir: args.output_dir.clone(),
            name: args.output_name.clone(),
        },
        formats,
        writer: WriterOptions {
            pin_layer: args.pin_layer.clone(),
        },
    }
}
