//! Diagnostic rendering for human-readable terminal output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[G301]: Tile logic: Row 1 width 3 sites doesn't match first row width 4 sites
///   --> tile library: tiles[0]
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The terminal width; notes longer than this are wrapped onto continuation lines.
    pub width: u16,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, width: u16) -> Self {
        Self { color, width }
    }

    fn push_footnote(&self, out: &mut String, label: &str, text: &str) {
        let prefix = format!("   = {label}: ");
        let indent = " ".repeat(prefix.len());
        let budget = (self.width as usize).saturating_sub(prefix.len()).max(20);
        let mut first = true;
        for line in text.lines() {
            for chunk in wrap(line, budget) {
                out.push_str(if first { &prefix } else { &indent });
                out.push_str(chunk);
                out.push('\n');
                first = false;
            }
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let mut lines = diag.message.lines();
        let headline = lines.next().unwrap_or_default();
        if self.color {
            out.push_str(&format!(
                "{}{}[{}]\x1b[0m: {}\n",
                diag.severity.ansi_color(),
                diag.severity,
                diag.code,
                headline
            ));
        } else {
            out.push_str(&format!("{}[{}]: {}\n", diag.severity, diag.code, headline));
        }
        // Multi-line messages (tile width breakdowns) keep their layout
        for line in lines {
            out.push_str(&format!("    {line}\n"));
        }

        if let Some(location) = &diag.location {
            out.push_str(&format!("  --> {location}\n"));
        }

        for note in &diag.notes {
            self.push_footnote(&mut out, "note", note);
        }
        for help in &diag.help {
            self.push_footnote(&mut out, "help", help);
        }

        out
    }
}

/// Splits `line` into chunks of at most `width` bytes, breaking at spaces when possible.
fn wrap(line: &str, width: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = line;
    while rest.len() > width && rest.is_char_boundary(width) {
        let split = rest[..width]
            .rfind(' ')
            .filter(|&pos| pos > 0)
            .unwrap_or(width);
        chunks.push(&rest[..split]);
        rest = rest[split..].trim_start();
    }
    chunks.push(rest);
    chunks
}
