//! Diagnostics emitted alongside successful and failed runs.

use fabgen_common::{ErrorKind, FabricError};
use fabgen_conformance::{
    fabric, full_pipeline, full_pipeline_with, pin, standard_tiles, technology, tile,
    tile_library,
};
use fabgen_diagnostics::{code, Severity};
use fabgen_engine::GenerateOptions;
use fabgen_spec::LoadOptions;
use serde_json::json;

#[test]
fn clean_run_has_only_progress_notes() {
    let result = full_pipeline(&technology(), &standard_tiles(), &fabric(2, 2, "logic"));
    assert_eq!(result.error_count, 0);
    assert_eq!(result.warning_count, 0);
    assert!(result.has_code(code::STAGE_PROGRESS));
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.severity == Severity::Note && d.code == code::STAGE_PROGRESS));
}

#[test]
fn unknown_fields_become_notes() {
    let mut spec = fabric(1, 1, "logic");
    spec["color"] = json!("blue");
    let mut tech = technology();
    tech["cells"][0]["vendor"] = json!("acme");

    let result = full_pipeline(&tech, &standard_tiles(), &spec);
    assert!(result.layout.is_some());
    let notes: Vec<&str> = result
        .diagnostics
        .iter()
        .filter(|d| d.code == code::UNKNOWN_FIELD)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().any(|m| m.contains("vendor")));
    assert!(notes.iter().any(|m| m.contains("color")));
}

#[test]
fn stray_auto_position_warns_by_default() {
    let mut spec = fabric(1, 1, "logic");
    spec["margins"] = json!({ "horizontal": 5.0, "vertical": 5.0 });
    spec["io_ring"] = json!({
        "edges": { "north": { "spacing": "auto", "pins": [pin("a", "input", Some(3.0))] } }
    });

    let result = full_pipeline(&technology(), &standard_tiles(), &spec);
    assert_eq!(result.warning_count, 1);
    assert!(result.has_code(code::STRAY_PIN_POSITION));
    assert_eq!(result.expect_layout().pins.len(), 1);

    let strict = full_pipeline_with(
        &technology(),
        &standard_tiles(),
        &spec,
        LoadOptions { strict: true },
        GenerateOptions::default(),
    );
    assert_eq!(strict.error_count, 1);
    assert_eq!(strict.expect_error().kind(), ErrorKind::InputMalformed);
}

#[test]
fn manual_pin_without_position_fails() {
    let mut spec = fabric(1, 1, "logic");
    spec["margins"] = json!({ "horizontal": 5.0, "vertical": 5.0 });
    spec["io_ring"] = json!({
        "edges": { "east": { "spacing": "manual", "pins": [pin("a", "input", None)] } }
    });
    let err = full_pipeline(&technology(), &standard_tiles(), &spec).expect_error();
    assert!(err
        .to_string()
        .contains("Pin a missing position in manual spacing mode"));
}

#[test]
fn pins_without_margins_fail() {
    let mut spec = fabric(1, 1, "logic");
    spec["io_ring"] = json!({
        "edges": { "north": { "spacing": "auto", "pins": [pin("a", "input", None)] } }
    });
    let err = full_pipeline(&technology(), &standard_tiles(), &spec).expect_error();
    assert_eq!(err.kind(), ErrorKind::InputMalformed);
    assert!(err.to_string().contains("Margins must be specified"));
}

#[test]
fn malformed_power_distribution_is_skipped_with_warning() {
    let mut spec = fabric(1, 1, "logic");
    spec["power_distribution"] = json!({ "primary_grid": 5 });
    let result = full_pipeline(&technology(), &standard_tiles(), &spec);
    assert!(result.has_code(code::POWER_DISTRIBUTION_IGNORED));
    assert!(result.expect_layout().power_distribution.is_none());
}

#[test]
fn well_formed_power_distribution_is_kept() {
    let mut spec = fabric(1, 1, "logic");
    spec["power_distribution"] = json!({
        "primary_grid": { "VDD": { "layer": "met4" }, "VSS": { "layer": "met4" } },
        "secondary_grid": { "VDD": { "layer": "met5" }, "VSS": { "layer": "met5" } }
    });
    let result = full_pipeline(&technology(), &standard_tiles(), &spec);
    assert_eq!(result.warning_count, 0);
    assert!(result.expect_layout().power_distribution.is_some());
}

#[test]
fn unknown_tile_alias_is_a_missing_reference() {
    let tiles = tile_library(vec![tile("logic", 2, &[&[("XOR9", 2)]])]);
    let result = full_pipeline(&technology(), &tiles, &fabric(1, 1, "logic"));
    assert!(result.has_code(code::UNKNOWN_CELL_ALIAS));
    match result.expect_error() {
        FabricError::UnknownCellAlias { alias, .. } => assert_eq!(alias, "XOR9"),
        other => panic!("expected UnknownCellAlias, got {other:?}"),
    }
}

#[test]
fn unknown_edge_cell_is_a_missing_reference() {
    let mut spec = fabric(1, 1, "logic");
    spec["edge_cells"] = json!({ "left": { "enable": true, "cell": "GUARD" } });
    let err = full_pipeline(&technology(), &standard_tiles(), &spec).expect_error();
    assert_eq!(err.kind(), ErrorKind::MissingReference);
}

#[test]
fn disabled_edge_cell_is_not_resolved() {
    let mut spec = fabric(1, 1, "logic");
    spec["edge_cells"] = json!({ "left": { "enable": false, "cell": "GUARD" } });
    let layout = full_pipeline(&technology(), &standard_tiles(), &spec).expect_layout();
    assert!(layout.edge_cells.is_empty());
}

#[test]
fn unknown_default_tile_is_reported_with_location() {
    let result = full_pipeline(&technology(), &standard_tiles(), &fabric(1, 1, "ghost"));
    let error = result
        .diagnostics
        .iter()
        .find(|d| d.severity == Severity::Error)
        .unwrap();
    assert_eq!(error.code, code::UNKNOWN_TILE);
    assert!(error.location.is_some());
    assert!(error.message.contains("ghost"));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let sink = fabgen_diagnostics::DiagnosticSink::new();
    let err = fabgen_spec::load_fabric_spec_from_str("{", LoadOptions::default(), &sink)
        .unwrap_err();
    assert!(matches!(err, FabricError::Parse { .. }));
    assert_eq!(err.kind(), ErrorKind::InputMalformed);
}
