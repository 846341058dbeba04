//! Structured diagnostic events emitted while loading and generating a fabric.
//!
//! The generator never writes to a global logger. Callers pass a
//! [`DiagnosticSink`] into every stage and receive [`Diagnostic`]s carrying a
//! severity, a stable [`DiagnosticCode`], and an optional document
//! [`Location`]. [`DiagnosticRenderer`] implementations format them for the
//! terminal.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod location;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use location::Location;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::{Severity, Verbosity};
pub use sink::DiagnosticSink;
