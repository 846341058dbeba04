//! How bad a diagnostic is, and how chatty a run has to be to show it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a diagnostic message.
///
/// Declaration order is significance order, so `Help < Note < Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// A suggestion attached to an accepted input.
    Help,
    /// Stage progress or an ignored field.
    Note,
    /// A questionable input that was accepted, e.g. a position on an auto pin.
    Warning,
    /// A problem that aborts generation.
    Error,
}

impl Severity {
    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// The quietest [`Verbosity`] at which diagnostics of this severity are shown.
    ///
    /// Errors survive `--quiet`; everything else needs at least the default.
    pub fn min_verbosity(self) -> Verbosity {
        match self {
            Severity::Error => Verbosity::Quiet,
            Severity::Warning | Severity::Note | Severity::Help => Verbosity::Normal,
        }
    }

    /// ANSI color escape used by the terminal renderer.
    pub fn ansi_color(self) -> &'static str {
        match self {
            Severity::Help => "\x1b[36m",
            Severity::Note => "\x1b[34m",
            Severity::Warning => "\x1b[33m",
            Severity::Error => "\x1b[31m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Help => write!(f, "help"),
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// How much diagnostic output a run asks for, from least to most.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and notes, but not stage progress.
    #[default]
    Normal,
    /// Everything, including stage progress.
    Verbose,
}

impl Verbosity {
    /// Maps the `--quiet` / `--verbose` flag pair; `quiet` wins if both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}
