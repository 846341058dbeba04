//! Technology document loading and validation.

use crate::raw::{RawCell, RawLayer, RawTechnology};
use crate::technology::Technology;
use crate::types::{
    CellCategory, CellDefinition, CellPin, LayerDirection, LayerInfo, PinDirection, PowerInfo,
    Site, Units,
};
use fabgen_common::{DocumentKind, FabricError};
use fabgen_diagnostics::{DiagnosticSink, Location};
use indexmap::IndexMap;
use std::path::Path;

const DOC: DocumentKind = DocumentKind::Technology;

/// Loads and validates a technology JSON document from `path`.
pub fn load_technology(path: &Path, sink: &DiagnosticSink) -> Result<Technology, FabricError> {
    let content = std::fs::read_to_string(path).map_err(|source| FabricError::Io {
        document: DOC,
        path: path.to_path_buf(),
        source,
    })?;
    load_technology_from_str(&content, sink)
}

/// Parses and validates a technology JSON document from a string.
///
/// Unknown fields are reported to `sink` as notes and otherwise ignored.
pub fn load_technology_from_str(
    content: &str,
    sink: &DiagnosticSink,
) -> Result<Technology, FabricError> {
    let raw: RawTechnology = serde_json::from_str(content).map_err(|e| FabricError::Parse {
        document: DOC,
        message: e.to_string(),
    })?;

    sink.note_ignored_fields(Location::new(DOC, ""), raw.extra.keys());

    let units = match raw.units {
        Some(u) => {
            sink.note_ignored_fields(Location::new(DOC, "units"), u.extra.keys());
            Units {
                distance: u.distance,
                time: u.time,
                capacitance: u.capacitance,
                resistance: u.resistance,
                current: u.current,
            }
        }
        None => Units::default(),
    };

    sink.note_ignored_fields(Location::new(DOC, "site"), raw.site.extra.keys());
    let site = Site {
        name: raw.site.name,
        width: raw.site.width,
        height: raw.site.height,
    };

    let cells = raw
        .cells
        .into_iter()
        .enumerate()
        .map(|(i, cell)| convert_cell(i, cell, sink))
        .collect::<Result<Vec<_>, _>>()?;

    let mut layers = IndexMap::with_capacity(raw.layers.len());
    for (name, layer) in raw.layers {
        let info = convert_layer(&name, layer, sink)?;
        layers.insert(name, info);
    }

    Technology::new(
        raw.technology,
        raw.version,
        raw.description,
        units,
        site,
        cells,
        layers,
    )
}

fn convert_cell(
    index: usize,
    raw: RawCell,
    sink: &DiagnosticSink,
) -> Result<CellDefinition, FabricError> {
    let path = format!("cells[{index}]");
    sink.note_ignored_fields(Location::new(DOC, path.clone()), raw.extra.keys());

    let category = CellCategory::parse(&raw.cell_type).ok_or_else(|| {
        FabricError::malformed(
            DOC,
            format!("{path}.cell_type"),
            format!(
                "invalid cell type '{}' (expected combinational, sequential or physical)",
                raw.cell_type
            ),
        )
    })?;

    let mut pins = IndexMap::new();
    for (pin_name, pin) in raw.pins.unwrap_or_default() {
        let pin_path = format!("{path}.pins.{pin_name}");
        sink.note_ignored_fields(Location::new(DOC, pin_path.clone()), pin.extra.keys());
        let direction = PinDirection::parse(&pin.direction).ok_or_else(|| {
            FabricError::malformed(
                DOC,
                format!("{pin_path}.direction"),
                format!("invalid pin direction '{}'", pin.direction),
            )
        })?;
        pins.insert(
            pin_name,
            CellPin {
                direction,
                capacitance: pin.capacitance,
                layer: pin.layer,
                function: pin.function,
                max_capacitance: pin.max_capacitance,
                max_fanout: pin.max_fanout,
                location: pin.location,
                clock: pin.clock,
            },
        );
    }

    let power = raw.power.map(|p| {
        sink.note_ignored_fields(Location::new(DOC, format!("{path}.power")), p.extra.keys());
        PowerInfo { leakage: p.leakage }
    });

    Ok(CellDefinition {
        name: raw.name,
        alias: raw.alias,
        width: raw.width,
        height: raw.height,
        category,
        pins,
        drive_strength: raw.drive_strength,
        function: raw.function,
        clock_pin: raw.clock_pin,
        spacing_rule: raw.spacing_rule,
        timing: raw.timing,
        power,
    })
}

fn convert_layer(
    name: &str,
    raw: RawLayer,
    sink: &DiagnosticSink,
) -> Result<LayerInfo, FabricError> {
    let path = format!("layers.{name}");
    sink.note_ignored_fields(Location::new(DOC, path.clone()), raw.extra.keys());
    let direction = LayerDirection::parse(&raw.direction).ok_or_else(|| {
        FabricError::malformed(
            DOC,
            format!("{path}.direction"),
            format!("invalid layer direction '{}'", raw.direction),
        )
    })?;
    Ok(LayerInfo {
        direction,
        pitch: raw.pitch,
        min_width: raw.min_width,
        programmable: raw.programmable,
    })
}
