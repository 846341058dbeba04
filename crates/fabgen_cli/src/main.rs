//! fabgen: the command-line front end of the structured ASIC fabric
//! generator.
//!
//! `fabgen generate` builds DEF, LEF and a JSON report from a technology
//! library, a tile library and a fabric specification. `fabgen check` stops
//! after validation. `fabgen build` reads the same inputs from a
//! `fabgen.toml` project file.

#![warn(missing_docs)]

mod build;
mod check;
mod generate;
mod pipeline;
mod summary;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use fabgen_diagnostics::Verbosity;

/// fabgen: structured ASIC fabric generator.
#[derive(Parser, Debug)]
#[command(name = "fabgen", version, about = "Structured ASIC fabric generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show progress notes.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a fabric and write its output files.
    Generate(GenerateArgs),
    /// Load and validate the inputs without generating.
    Check(CheckArgs),
    /// Generate from a `fabgen.toml` project file.
    Build(BuildArgs),
}

/// The three input documents.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Technology library (JSON).
    pub technology: PathBuf,
    /// Tile library (JSON).
    pub tiles: PathBuf,
    /// Fabric specification (JSON).
    pub fabric: PathBuf,
}

/// Arguments for `fabgen generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Input documents.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output directory.
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Output base name.
    #[arg(short = 'n', long)]
    pub output_name: Option<String>,

    /// I/O pin width and height in microns.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], conflicts_with = "pin_size_dbu")]
    pub pin_size: Option<Vec<f64>>,

    /// I/O pin width and height in database units.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub pin_size_dbu: Option<Vec<f64>>,

    /// Write only the DEF file.
    #[arg(long)]
    pub def_only: bool,

    /// Pin layer for DEF and LEF.
    #[arg(long, default_value = fabgen_writers::DEFAULT_PIN_LAYER)]
    pub pin_layer: String,

    /// Output format for diagnostics and the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Expand tiles in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Treat recoverable input oddities as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `fabgen check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Input documents.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Treat recoverable input oddities as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `fabgen build`.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Path to `fabgen.toml` or the directory holding it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format for diagnostics and the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print progress notes.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
}

impl GlobalArgs {
    /// The diagnostic verbosity selected by `--quiet` / `--verbose`.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
    };

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Build(ref args) => build::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
