//! Tile library and fabric specification loading.
//!
//! Both loaders follow the same shape: read the file, deserialize into the
//! wire structs, report unknown keys as notes, then convert into validated
//! types. Anything structurally wrong aborts with a [`FabricError`]; the
//! power distribution section is the one best-effort exception and degrades
//! to a warning.

use crate::fabric::{
    ArrayDimensions, EdgeCellSide, EdgeCells, FabricSpec, IoEdge, IoPin, IoRing, IoSide,
    ManualPin, Margins, PinSize, PowerDistribution, PowerGrid, PowerRail, RailValue, Region,
    RegionArea, Spacing, TileConfiguration,
};
use crate::raw::{
    RawEdgeCells, RawEdgeSide, RawFabric, RawIoEdge, RawIoRing, RawTile, RawTileLibrary,
};
use crate::tiles::{CellSpec, Tile, TileLibrary, TileRow};
use fabgen_common::{DocumentKind, FabricError};
use fabgen_diagnostics::{code, Diagnostic, DiagnosticSink, Location};
use fabgen_tech::PinDirection;
use serde_json::Value;
use std::path::Path;

/// Options controlling how forgiving the fabric loader is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Turn recoverable oddities (a `position` on an auto-spaced pin) into errors.
    pub strict: bool,
}

fn read(document: DocumentKind, path: &Path) -> Result<String, FabricError> {
    std::fs::read_to_string(path).map_err(|source| FabricError::Io {
        document,
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(
    document: DocumentKind,
    content: &str,
) -> Result<T, FabricError> {
    serde_json::from_str(content).map_err(|e| FabricError::Parse {
        document,
        message: e.to_string(),
    })
}

/// Loads a tile library JSON document from `path`.
pub fn load_tile_library(path: &Path, sink: &DiagnosticSink) -> Result<TileLibrary, FabricError> {
    let content = read(DocumentKind::TileLibrary, path)?;
    load_tile_library_from_str(&content, sink)
}

/// Parses a tile library JSON document from a string.
///
/// Row widths are not checked here because they depend on the technology;
/// see [`crate::validate`].
pub fn load_tile_library_from_str(
    content: &str,
    sink: &DiagnosticSink,
) -> Result<TileLibrary, FabricError> {
    const DOC: DocumentKind = DocumentKind::TileLibrary;
    let raw: RawTileLibrary = parse(DOC, content)?;
    sink.note_ignored_fields(Location::new(DOC, ""), raw.extra.keys());

    let tiles = raw
        .tiles
        .into_iter()
        .enumerate()
        .map(|(i, tile)| convert_tile(i, tile, sink))
        .collect::<Result<Vec<_>, _>>()?;
    TileLibrary::new(tiles)
}

fn convert_tile(index: usize, raw: RawTile, sink: &DiagnosticSink) -> Result<Tile, FabricError> {
    const DOC: DocumentKind = DocumentKind::TileLibrary;
    let path = format!("tiles[{index}]");
    sink.note_ignored_fields(Location::new(DOC, path.clone()), raw.extra.keys());

    let mut rows = Vec::with_capacity(raw.rows.len());
    for (r, row) in raw.rows.into_iter().enumerate() {
        let row_path = format!("{path}.rows[{r}]");
        sink.note_ignored_fields(Location::new(DOC, row_path.clone()), row.extra.keys());
        let cells = row
            .cells
            .into_iter()
            .enumerate()
            .map(|(c, cell)| {
                sink.note_ignored_fields(
                    Location::new(DOC, format!("{row_path}.cells[{c}]")),
                    cell.extra.keys(),
                );
                CellSpec {
                    alias: cell.alias,
                    count: cell.count,
                }
            })
            .collect();
        rows.push(TileRow {
            row_id: row.row_id,
            cells,
        });
    }

    Tile::new(
        raw.name,
        raw.description,
        raw.width,
        raw.height,
        raw.site,
        rows,
    )
}

/// Loads a fabric specification JSON document from `path`.
pub fn load_fabric_spec(
    path: &Path,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<FabricSpec, FabricError> {
    let content = read(DocumentKind::FabricSpec, path)?;
    load_fabric_spec_from_str(&content, options, sink)
}

/// Parses a fabric specification JSON document from a string.
pub fn load_fabric_spec_from_str(
    content: &str,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<FabricSpec, FabricError> {
    const DOC: DocumentKind = DocumentKind::FabricSpec;
    let raw: RawFabric = parse(DOC, content)?;
    sink.note_ignored_fields(Location::new(DOC, ""), raw.extra.keys());

    sink.note_ignored_fields(
        Location::new(DOC, "array_dimensions"),
        raw.array_dimensions.extra.keys(),
    );
    let array = ArrayDimensions::new(raw.array_dimensions.rows, raw.array_dimensions.cols)?;

    let tc = raw.tile_configuration;
    sink.note_ignored_fields(Location::new(DOC, "tile_configuration"), tc.extra.keys());
    let regions = tc
        .regions
        .into_iter()
        .enumerate()
        .map(|(i, region)| {
            let path = format!("tile_configuration.regions[{i}]");
            sink.note_ignored_fields(Location::new(DOC, path.clone()), region.extra.keys());
            sink.note_ignored_fields(
                Location::new(DOC, format!("{path}.area")),
                region.area.extra.keys(),
            );
            let area = RegionArea::new(
                &format!("{path}.area"),
                region.area.row_start,
                region.area.col_start,
                region.area.width,
                region.area.height,
            )?;
            Ok(Region {
                name: region.name,
                tile_type: region.tile_type,
                area,
            })
        })
        .collect::<Result<Vec<_>, FabricError>>()?;
    let tile_configuration = TileConfiguration {
        default_tile: tc.default_tile,
        regions,
    };

    let edge_cells = raw.edge_cells.map(|e| convert_edge_cells(e, sink));
    let io_ring = raw
        .io_ring
        .map(|ring| convert_io_ring(ring, options, sink))
        .transpose()?;
    let margins = match raw.margins {
        Some(m) => {
            sink.note_ignored_fields(Location::new(DOC, "margins"), m.extra.keys());
            Some(Margins::new(m.horizontal, m.vertical)?)
        }
        None => None,
    };
    let power_distribution = raw
        .power_distribution
        .and_then(|value| convert_power_distribution(value, sink));

    FabricSpec::new(
        raw.name,
        raw.description,
        array,
        tile_configuration,
        edge_cells,
        io_ring,
        margins,
        power_distribution,
    )
}

fn convert_edge_cells(raw: RawEdgeCells, sink: &DiagnosticSink) -> EdgeCells {
    let side = |name: &str, raw: Option<RawEdgeSide>| {
        raw.map(|s| {
            sink.note_ignored_fields(
                Location::new(DocumentKind::FabricSpec, format!("edge_cells.{name}")),
                s.extra.keys(),
            );
            EdgeCellSide {
                enable: s.enable,
                cell: s.cell,
            }
        })
    };
    sink.note_ignored_fields(
        Location::new(DocumentKind::FabricSpec, "edge_cells"),
        raw.extra.keys(),
    );
    EdgeCells {
        left: side("left", raw.left),
        right: side("right", raw.right),
        top: side("top", raw.top),
        bottom: side("bottom", raw.bottom),
    }
}

fn convert_io_ring(
    raw: RawIoRing,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<IoRing, FabricError> {
    const DOC: DocumentKind = DocumentKind::FabricSpec;
    sink.note_ignored_fields(Location::new(DOC, "io_ring"), raw.extra.keys());

    let pin_size = match raw.pin_size {
        Some(size) => {
            sink.note_ignored_fields(Location::new(DOC, "io_ring.pin_size"), size.extra.keys());
            PinSize::new(size.width, size.height)?
        }
        None => PinSize::default(),
    };

    let mut edges = Vec::with_capacity(raw.edges.len());
    for (name, edge) in raw.edges {
        let path = format!("io_ring.edges.{name}");
        let side = IoSide::parse(&name).ok_or_else(|| {
            FabricError::malformed(
                DOC,
                path.clone(),
                format!("invalid I/O edge '{name}' (expected north, south, east or west)"),
            )
        })?;
        let spacing = convert_io_edge(&path, edge, options, sink)?;
        edges.push(IoEdge { side, spacing });
    }

    Ok(IoRing { pin_size, edges })
}

fn convert_io_edge(
    path: &str,
    raw: RawIoEdge,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<Spacing, FabricError> {
    const DOC: DocumentKind = DocumentKind::FabricSpec;
    sink.note_ignored_fields(Location::new(DOC, path), raw.extra.keys());

    let manual = match raw.spacing.as_str() {
        "auto" => false,
        "manual" => true,
        other => {
            return Err(FabricError::malformed(
                DOC,
                format!("{path}.spacing"),
                format!("invalid spacing mode '{other}' (expected auto or manual)"),
            ))
        }
    };

    let mut auto = Vec::new();
    let mut placed = Vec::new();
    for (i, raw_pin) in raw.pins.into_iter().enumerate() {
        let pin_path = format!("{path}.pins[{i}]");
        sink.note_ignored_fields(Location::new(DOC, pin_path.clone()), raw_pin.extra.keys());
        let direction = PinDirection::parse(&raw_pin.direction).ok_or_else(|| {
            FabricError::malformed(
                DOC,
                format!("{pin_path}.direction"),
                format!("invalid pin direction '{}'", raw_pin.direction),
            )
        })?;
        let pin = IoPin {
            name: raw_pin.name,
            pin_type: raw_pin.pin_type,
            direction,
        };

        match (manual, raw_pin.position) {
            (true, Some(position)) => placed.push(ManualPin { pin, position }),
            (true, None) => {
                return Err(FabricError::malformed(
                    DOC,
                    format!("{pin_path}.position"),
                    format!("Pin {} missing position in manual spacing mode", pin.name),
                ))
            }
            (false, Some(_)) if options.strict => {
                return Err(FabricError::malformed(
                    DOC,
                    format!("{pin_path}.position"),
                    format!("Pin {} has a position but its edge uses auto spacing", pin.name),
                ))
            }
            (false, Some(_)) => {
                sink.emit(
                    Diagnostic::warning(
                        code::STRAY_PIN_POSITION,
                        format!(
                            "Pin {} has position field in auto mode - will be ignored",
                            pin.name
                        ),
                    )
                    .with_location(Location::new(DOC, format!("{pin_path}.position")))
                    .with_help("set `\"spacing\": \"manual\"` on the edge to honour positions"),
                );
                auto.push(pin);
            }
            (false, None) => auto.push(pin),
        }
    }

    Ok(if manual {
        Spacing::Manual(placed)
    } else {
        Spacing::Auto(auto)
    })
}

fn convert_power_distribution(value: Value, sink: &DiagnosticSink) -> Option<PowerDistribution> {
    if is_empty(&value) {
        return None;
    }
    match parse_power_distribution(&value) {
        Ok(pd) => Some(pd),
        Err(reason) => {
            sink.emit(
                Diagnostic::warning(
                    code::POWER_DISTRIBUTION_IGNORED,
                    format!("{reason} - skipping power distribution"),
                )
                .with_location(Location::new(DocumentKind::FabricSpec, "power_distribution")),
            );
            None
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn parse_power_distribution(value: &Value) -> Result<PowerDistribution, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "power_distribution is not an object".to_string())?;
    let primary = obj
        .get("primary_grid")
        .ok_or_else(|| "Missing 'primary_grid' in power_distribution".to_string())?;
    let secondary = obj
        .get("secondary_grid")
        .ok_or_else(|| "Missing 'secondary_grid' in power_distribution".to_string())?;
    Ok(PowerDistribution {
        primary_grid: parse_grid("Primary", primary)?,
        secondary_grid: parse_grid("Secondary", secondary)?,
    })
}

fn parse_grid(label: &str, value: &Value) -> Result<PowerGrid, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("{label} grid is not an object"))?;
    let rail = |key: &str| -> Result<Option<PowerRail>, String> {
        match obj.get(key) {
            None => Ok(None),
            Some(v) if is_empty(v) => Ok(None),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => RailValue::Text(s.clone()),
                        Value::Number(n) => n
                            .as_f64()
                            .map(RailValue::Number)
                            .ok_or_else(|| format!("{label} grid {key}.{k} is not a finite number"))?,
                        _ => return Err(format!("{label} grid {key}.{k} must be a string or number")),
                    };
                    Ok((k.clone(), value))
                })
                .collect::<Result<PowerRail, String>>()
                .map(Some),
            Some(_) => Err(format!("{label} grid {key} is not an object")),
        }
    };
    let vdd = rail("VDD")?;
    let vss = rail("VSS")?;
    if vdd.is_none() && vss.is_none() {
        return Err(format!("{label} grid has neither VDD nor VSS"));
    }
    Ok(PowerGrid { vdd, vss })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabgen_common::ErrorKind;
    use fabgen_diagnostics::Severity;
    use std::io::Write;

    const TILES: &str = r#"
{
  "tiles": [
    {
      "name": "logic",
      "description": "NAND2 over INV",
      "width": 2,
      "height": 2,
      "site": "unithd",
      "rows": [
        { "row_id": 0, "cells": [ { "type": "NAND2", "count": 1 }, { "type": "INV", "count": 1 } ] },
        { "row_id": 1, "cells": [ { "type": "INV", "count": 2 } ] }
      ]
    },
    {
      "name": "filler",
      "width": 2,
      "height": 2,
      "site": "unithd",
      "color": "grey",
      "rows": [
        { "row_id": 0, "cells": [ { "type": "DECAP", "count": 2 } ] },
        { "row_id": 1, "cells": [ { "type": "DECAP", "count": 2, "note": "x" } ] }
      ]
    }
  ]
}
"#;

    const FABRIC: &str = r#"
{
  "name": "demo",
  "description": "two by two",
  "array_dimensions": { "rows": 2, "cols": 2 },
  "tile_configuration": {
    "default_tile": "logic",
    "regions": [
      { "name": "fill", "tile_type": "filler",
        "area": { "row_start": 0, "col_start": 1, "width": 1, "height": 1 } }
    ]
  },
  "edge_cells": {
    "left": { "enable": true, "cell": "TAP" },
    "top": { "enable": false, "cell": "TAP" }
  },
  "io_ring": {
    "pin_size": { "width": 0.5, "height": 0.8 },
    "edges": {
      "west": { "spacing": "manual", "pins": [
        { "name": "rst", "type": "signal", "direction": "input", "position": 12.0 }
      ] },
      "north": { "spacing": "auto", "pins": [
        { "name": "clk", "type": "clock", "direction": "input" },
        { "name": "out", "type": "signal", "direction": "output" }
      ] }
    }
  },
  "margins": { "horizontal": 10, "vertical": 8.5 },
  "power_distribution": {
    "primary_grid": { "VDD": { "layer": "met4", "width": 1.6 } },
    "secondary_grid": { "VSS": { "layer": "met5", "pitch": 27 } }
  }
}
"#;

    fn load(doc: &str) -> Result<FabricSpec, FabricError> {
        load_fabric_spec_from_str(doc, LoadOptions::default(), &DiagnosticSink::new())
    }

    #[test]
    fn parse_tile_library() {
        let sink = DiagnosticSink::new();
        let lib = load_tile_library_from_str(TILES, &sink).unwrap();
        assert_eq!(lib.len(), 2);
        let logic = lib.get("logic").unwrap();
        assert_eq!(logic.description(), "NAND2 over INV");
        assert_eq!(logic.rows()[0].cells[1].alias, "INV");
        assert_eq!(logic.cell_count(), 4);
        assert_eq!(lib.get("filler").unwrap().description(), "");

        let paths: Vec<_> = sink
            .take_all()
            .into_iter()
            .map(|d| d.location.unwrap().path)
            .collect();
        assert_eq!(paths, vec!["tiles[1]", "tiles[1].rows[1].cells[0]"]);
    }

    #[test]
    fn tile_row_count_checked_on_load() {
        let doc = r#"{ "tiles": [ { "name": "t", "width": 1, "height": 2, "site": "s",
            "rows": [ { "row_id": 0, "cells": [] } ] } ] }"#;
        let err = load_tile_library_from_str(doc, &DiagnosticSink::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputMalformed);
    }

    #[test]
    fn parse_full_fabric() {
        let sink = DiagnosticSink::new();
        let spec = load_fabric_spec_from_str(FABRIC, LoadOptions::default(), &sink).unwrap();
        assert_eq!(spec.name(), "demo");
        assert_eq!(spec.array().rows(), 2);
        assert_eq!(spec.tile_configuration().default_tile, "logic");
        assert_eq!(spec.tile_configuration().regions[0].area.col_start, 1);
        assert_eq!(spec.edge_cell(crate::Side::Left), Some("TAP"));
        assert_eq!(spec.edge_cell(crate::Side::Top), None);

        let ring = spec.io_ring().unwrap();
        assert_eq!(ring.pin_size.width(), 0.5);
        let sides: Vec<_> = ring.edges.iter().map(|e| e.side).collect();
        assert_eq!(sides, vec![IoSide::West, IoSide::North], "document order");
        match &ring.edges[0].spacing {
            Spacing::Manual(pins) => assert_eq!(pins[0].position, 12.0),
            other => panic!("expected manual spacing, got {other:?}"),
        }
        assert_eq!(ring.pin_count(), 3);

        assert_eq!(spec.margins().unwrap().vertical(), 8.5);
        let power = spec.power_distribution().unwrap();
        assert!(power.primary_grid.vss.is_none());
        assert_eq!(
            power.secondary_grid.vss.as_ref().unwrap()["pitch"],
            RailValue::Number(27.0)
        );
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn minimal_fabric() {
        let spec = load(
            r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 3 },
                 "tile_configuration": { "default_tile": "logic" } }"#,
        )
        .unwrap();
        assert_eq!(spec.description(), "");
        assert!(spec.tile_configuration().regions.is_empty());
        assert!(spec.edge_cells().is_none());
        assert!(spec.io_ring().is_none());
        assert!(spec.margins().is_none());
    }

    #[test]
    fn missing_name_is_parse_error() {
        let err = load(
            r#"{ "array_dimensions": { "rows": 1, "cols": 1 },
                 "tile_configuration": { "default_tile": "t" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, FabricError::Parse { .. }));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn non_positive_array_is_degenerate() {
        let err = load(
            r#"{ "name": "m", "array_dimensions": { "rows": 0, "cols": 1 },
                 "tile_configuration": { "default_tile": "t" } }"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputedDegenerate);
    }

    #[test]
    fn zero_width_region_is_degenerate() {
        let err = load(
            r#"{ "name": "m", "array_dimensions": { "rows": 3, "cols": 3 },
                 "tile_configuration": { "default_tile": "t", "regions": [
                    { "name": "empty", "tile_type": "t",
                      "area": { "row_start": 1, "col_start": 1, "width": 0, "height": 1 } } ] } }"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputedDegenerate);
        assert!(err
            .to_string()
            .starts_with("tile_configuration.regions[0].area.width must be positive"));
    }

    #[test]
    fn pins_without_margins_rejected() {
        let err = load(
            r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 1 },
                 "tile_configuration": { "default_tile": "t" },
                 "io_ring": { "edges": { "south": { "pins": [
                    { "name": "a", "type": "signal", "direction": "input" } ] } } } }"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputMalformed);
    }

    #[test]
    fn manual_pin_requires_position() {
        let err = load(
            r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 1 },
                 "tile_configuration": { "default_tile": "t" },
                 "margins": { "horizontal": 1, "vertical": 1 },
                 "io_ring": { "edges": { "east": { "spacing": "manual", "pins": [
                    { "name": "a", "type": "signal", "direction": "input" } ] } } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Pin a missing position in manual spacing mode"));
    }

    const STRAY: &str = r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 1 },
        "tile_configuration": { "default_tile": "t" },
        "margins": { "horizontal": 1, "vertical": 1 },
        "io_ring": { "edges": { "north": { "pins": [
            { "name": "a", "type": "signal", "direction": "input", "position": 4 } ] } } } }"#;

    #[test]
    fn stray_auto_position_warns() {
        let sink = DiagnosticSink::new();
        let spec = load_fabric_spec_from_str(STRAY, LoadOptions::default(), &sink).unwrap();
        assert!(matches!(spec.io_ring().unwrap().edges[0].spacing, Spacing::Auto(_)));
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].code, code::STRAY_PIN_POSITION);
    }

    #[test]
    fn stray_auto_position_fails_when_strict() {
        let err = load_fabric_spec_from_str(
            STRAY,
            LoadOptions { strict: true },
            &DiagnosticSink::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputMalformed);
    }

    #[test]
    fn invalid_edge_and_spacing_rejected() {
        let bad_edge = r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 1 },
            "tile_configuration": { "default_tile": "t" },
            "io_ring": { "edges": { "up": { "pins": [] } } } }"#;
        match load(bad_edge).unwrap_err() {
            FabricError::Malformed { location, .. } => assert_eq!(location, "io_ring.edges.up"),
            other => panic!("expected Malformed, got {other:?}"),
        }

        let bad_spacing = r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 1 },
            "tile_configuration": { "default_tile": "t" },
            "io_ring": { "edges": { "east": { "spacing": "even", "pins": [] } } } }"#;
        assert!(load(bad_spacing)
            .unwrap_err()
            .to_string()
            .contains("invalid spacing mode 'even'"));
    }

    #[test]
    fn malformed_power_distribution_is_skipped() {
        let cases = [
            (r#"{ "primary_grid": { "VDD": { "layer": "met4" } } }"#, "secondary_grid"),
            (
                r#"{ "primary_grid": {}, "secondary_grid": { "VSS": { "layer": "m" } } }"#,
                "Primary grid has neither VDD nor VSS",
            ),
            (
                r#"{ "primary_grid": { "VDD": { "layer": ["a"] } }, "secondary_grid": { "VSS": { "w": 1 } } }"#,
                "VDD.layer",
            ),
        ];
        for (power, expected) in cases {
            let doc = format!(
                r#"{{ "name": "m", "array_dimensions": {{ "rows": 1, "cols": 1 }},
                     "tile_configuration": {{ "default_tile": "t" }},
                     "power_distribution": {power} }}"#
            );
            let sink = DiagnosticSink::new();
            let spec = load_fabric_spec_from_str(&doc, LoadOptions::default(), &sink).unwrap();
            assert!(spec.power_distribution().is_none());
            let diags = sink.take_all();
            assert_eq!(diags.len(), 1, "{power}");
            assert_eq!(diags[0].code, code::POWER_DISTRIBUTION_IGNORED);
            assert!(diags[0].message.contains(expected), "{}", diags[0].message);
        }
    }

    #[test]
    fn empty_power_distribution_is_silent() {
        let sink = DiagnosticSink::new();
        let spec = load_fabric_spec_from_str(
            r#"{ "name": "m", "array_dimensions": { "rows": 1, "cols": 1 },
                 "tile_configuration": { "default_tile": "t" }, "power_distribution": {} }"#,
            LoadOptions::default(),
            &sink,
        )
        .unwrap();
        assert!(spec.power_distribution().is_none());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn unknown_fabric_fields_noted() {
        let sink = DiagnosticSink::new();
        load_fabric_spec_from_str(
            r#"{ "name": "m", "version": 2, "array_dimensions": { "rows": 1, "cols": 1, "depth": 1 },
                 "tile_configuration": { "default_tile": "t" } }"#,
            LoadOptions::default(),
            &sink,
        )
        .unwrap();
        let diags = sink.take_all();
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message.contains("version"));
        assert_eq!(diags[1].location.as_ref().unwrap().path, "array_dimensions");
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FABRIC.as_bytes()).unwrap();
        let spec =
            load_fabric_spec(file.path(), LoadOptions::default(), &DiagnosticSink::new()).unwrap();
        assert_eq!(spec.name(), "demo");

        let err = load_tile_library(
            Path::new("/nonexistent/tiles.json"),
            &DiagnosticSink::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
