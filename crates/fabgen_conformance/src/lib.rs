//! Conformance test helpers for the fabgen pipeline.
//!
//! Builds input documents as JSON values, runs them through the full
//! pipeline (load → validate → generate) and returns structured results for
//! assertion in integration tests. [`render_all`] adds the writers on top.

#![warn(missing_docs)]

use fabgen_common::FabricError;
use fabgen_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use fabgen_engine::{generate_fabric, FabricLayout, GenerateOptions};
use fabgen_spec::{
    load_fabric_spec_from_str, load_tile_library_from_str, validate, LoadOptions,
};
use fabgen_tech::load_technology_from_str;
use fabgen_writers::{write_def, write_json_report, write_lef, WriterOptions};
use serde_json::{json, Value};

/// Result of running the full pipeline.
pub struct PipelineResult {
    /// The generated layout, if every stage succeeded.
    pub layout: Option<FabricLayout>,
    /// The error that aborted the run, if any.
    pub error: Option<FabricError>,
    /// All diagnostics emitted during the run, the aborting error last.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Returns the layout, panicking with the error if the run failed.
    pub fn expect_layout(self) -> FabricLayout {
        match (self.layout, self.error) {
            (Some(layout), _) => layout,
            (None, Some(err)) => panic!("pipeline failed: {err}"),
            (None, None) => panic!("pipeline produced neither a layout nor an error"),
        }
    }

    /// Returns the error, panicking if the run succeeded.
    pub fn expect_error(self) -> FabricError {
        match self.error {
            Some(err) => err,
            None => panic!("pipeline unexpectedly succeeded"),
        }
    }

    /// Returns `true` if a diagnostic with `code` was emitted.
    pub fn has_code(&self, code: fabgen_diagnostics::DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}

/// Runs the full pipeline with default options.
pub fn full_pipeline(technology: &Value, tiles: &Value, fabric: &Value) -> PipelineResult {
    full_pipeline_with(
        technology,
        tiles,
        fabric,
        LoadOptions::default(),
        GenerateOptions::default(),
    )
}

/// Runs the full pipeline with explicit loader and engine options.
pub fn full_pipeline_with(
    technology: &Value,
    tiles: &Value,
    fabric: &Value,
    load: LoadOptions,
    generate: GenerateOptions,
) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let outcome = run(technology, tiles, fabric, load, generate, &sink);
    let (layout, error) = match outcome {
        Ok(layout) => (Some(layout), None),
        Err(err) => {
            sink.emit(Diagnostic::from(&err));
            (None, Some(err))
        }
    };
    let diagnostics = sink.take_all();
    let error_count = count(&diagnostics, Severity::Error);
    let warning_count = count(&diagnostics, Severity::Warning);
    PipelineResult {
        layout,
        error,
        diagnostics,
        error_count,
        warning_count,
    }
}

fn run(
    technology: &Value,
    tiles: &Value,
    fabric: &Value,
    load: LoadOptions,
    generate: GenerateOptions,
    sink: &DiagnosticSink,
) -> Result<FabricLayout, FabricError> {
    let tech = load_technology_from_str(&technology.to_string(), sink)?;
    let library = load_tile_library_from_str(&tiles.to_string(), sink)?;
    let spec = load_fabric_spec_from_str(&fabric.to_string(), load, sink)?;
    let validated = validate(&tech, &library, &spec, sink)?;
    generate_fabric(validated, &generate, sink)
}

fn count(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}

/// DEF, LEF and JSON renderings of one layout.
pub struct RenderedOutputs {
    /// DEF text.
    pub def: String,
    /// LEF text.
    pub lef: String,
    /// JSON report text.
    pub json: String,
}

/// Renders every output format with default writer options.
pub fn render_all(layout: &FabricLayout) -> RenderedOutputs {
    let options = WriterOptions::default();
    RenderedOutputs {
        def: write_def(layout, &options).expect("DEF rendering"),
        lef: write_lef(layout, &options).expect("LEF rendering"),
        json: write_json_report(layout).expect("JSON rendering"),
    }
}

/// A small technology on a 0.46 x 2.72 um site.
///
/// | alias  | width | category      | leakage (uW) |
/// |--------|-------|---------------|--------------|
/// | NAND2  | 1     | combinational | 2.0          |
/// | INV    | 1     | combinational | 1.0          |
/// | NOR2   | 1     | combinational | 1.5          |
/// | DFF    | 4     | sequential    | 10.0         |
/// | TAP    | 1     | physical      | -            |
/// | DECAP4 | 2     | physical      | -            |
pub fn technology() -> Value {
    json!({
        "technology": "conformance",
        "version": "1.0",
        "units": { "distance": 1000 },
        "site": { "name": "unithd", "width": 0.46, "height": 2.72 },
        "cells": [
            cell("cell_nand2", "NAND2", 1, "combinational", Some(2.0)),
            cell("cell_inv", "INV", 1, "combinational", Some(1.0)),
            cell("cell_nor2", "NOR2", 1, "combinational", Some(1.5)),
            cell("cell_dff", "DFF", 4, "sequential", Some(10.0)),
            cell("cell_tap", "TAP", 1, "physical", None),
            cell("cell_decap4", "DECAP4", 2, "physical", None),
        ]
    })
}

fn cell(name: &str, alias: &str, width: u32, category: &str, leakage: Option<f64>) -> Value {
    let mut cell = json!({
        "name": name,
        "alias": alias,
        "width": width,
        "height": 1,
        "cell_type": category,
    });
    if let Some(leakage) = leakage {
        cell["power"] = json!({ "leakage": leakage });
    }
    cell
}

/// A tile whose rows list `(alias, count)` runs.
pub fn tile(name: &str, width: u32, rows: &[&[(&str, u32)]]) -> Value {
    let rows: Vec<Value> = rows
        .iter()
        .enumerate()
        .map(|(row_id, cells)| {
            let cells: Vec<Value> = cells
                .iter()
                .map(|(alias, count)| json!({ "type": alias, "count": count }))
                .collect();
            json!({ "row_id": row_id, "cells": cells })
        })
        .collect();
    json!({
        "name": name,
        "width": width,
        "height": rows.len(),
        "site": "unithd",
        "rows": rows,
    })
}

/// A tile library document.
pub fn tile_library(tiles: Vec<Value>) -> Value {
    json!({ "tiles": tiles })
}

/// The two-tile library used by most scenarios.
///
/// `logic` is NAND2 + INV in one row of width 2; `fill` is a single DECAP4
/// with the same footprint.
pub fn standard_tiles() -> Value {
    tile_library(vec![
        tile("logic", 2, &[&[("NAND2", 1), ("INV", 1)]]),
        tile("fill", 2, &[&[("DECAP4", 1)]]),
    ])
}

/// A fabric with no regions, edges, I/O ring or margins.
pub fn fabric(rows: i64, cols: i64, default_tile: &str) -> Value {
    json!({
        "name": "conformance_fabric",
        "array_dimensions": { "rows": rows, "cols": cols },
        "tile_configuration": { "default_tile": default_tile, "regions": [] },
    })
}

/// A region entry for `tile_configuration.regions`.
pub fn region(name: &str, tile: &str, row: u32, col: u32, width: u32, height: u32) -> Value {
    json!({
        "name": name,
        "tile_type": tile,
        "area": { "row_start": row, "col_start": col, "width": width, "height": height },
    })
}

/// An I/O pin entry; `position` makes it a manual pin.
pub fn pin(name: &str, direction: &str, position: Option<f64>) -> Value {
    let mut pin = json!({ "name": name, "type": "signal", "direction": direction });
    if let Some(position) = position {
        pin["position"] = json!(position);
    }
    pin
}
