//! JSON summary report.
//!
//! The report mirrors what a downstream flow needs without parsing DEF:
//! extents, statistics, placed pins, the resolved tile grid and the layout
//! fingerprint.

use crate::error::WriterError;
use fabgen_engine::{FabricLayout, PlacedPin};
use fabgen_tech::PinDirection;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Report<'a> {
    fabric_name: &'a str,
    dimensions: Dimensions,
    statistics: Statistics<'a>,
    io_pins: Vec<Pin<'a>>,
    tile_array: Vec<Vec<String>>,
    fingerprint: String,
}

#[derive(Serialize)]
struct Dimensions {
    tile_array: TileArray,
    fabric: Fabric,
    core_area: Area,
    die_area: Area,
    margins: MarginsReport,
}

#[derive(Serialize)]
struct TileArray {
    rows: u32,
    cols: u32,
}

#[derive(Serialize)]
struct Fabric {
    rows: u64,
    sites: u64,
}

#[derive(Serialize)]
struct Area {
    width_um: f64,
    height_um: f64,
}

#[derive(Serialize)]
struct MarginsReport {
    horizontal_um: f64,
    vertical_um: f64,
}

#[derive(Serialize)]
struct Statistics<'a> {
    fabric_cells: &'a BTreeMap<String, u64>,
    edge_cells: &'a BTreeMap<String, u64>,
    combined_cell_counts: &'a BTreeMap<String, u64>,
    total_fabric_cells: u64,
    total_edge_cells: u64,
    total_leakage_power_watts: f64,
    fabric_area_um2: f64,
    die_area_um2: f64,
}

#[derive(Serialize)]
struct Pin<'a> {
    name: &'a str,
    direction: PinDirection,
    #[serde(rename = "type")]
    pin_type: &'a str,
    edge: &'a str,
    position: PinPosition,
}

#[derive(Serialize)]
struct PinPosition {
    x_um: f64,
    y_um: f64,
    width_um: f64,
    height_um: f64,
}

impl<'a> From<&'a PlacedPin> for Pin<'a> {
    fn from(pin: &'a PlacedPin) -> Self {
        Pin {
            name: &pin.name,
            direction: pin.direction,
            pin_type: &pin.pin_type,
            edge: pin.side.as_str(),
            position: PinPosition {
                x_um: pin.x,
                y_um: pin.y,
                width_um: pin.width,
                height_um: pin.height,
            },
        }
    }
}

/// Renders the JSON report for `layout`, pretty-printed with two-space
/// indentation.
pub fn write_json_report(layout: &FabricLayout) -> Result<String, WriterError> {
    let d = &layout.dimensions;
    let s = &layout.stats;
    let report = Report {
        fabric_name: &layout.name,
        dimensions: Dimensions {
            tile_array: TileArray {
                rows: d.tile_array_rows,
                cols: d.tile_array_cols,
            },
            fabric: Fabric {
                rows: d.fabric_rows,
                sites: d.fabric_sites,
            },
            core_area: Area {
                width_um: d.core_width,
                height_um: d.core_height,
            },
            die_area: Area {
                width_um: d.die_width,
                height_um: d.die_height,
            },
            margins: MarginsReport {
                horizontal_um: d.margin_horizontal,
                vertical_um: d.margin_vertical,
            },
        },
        statistics: Statistics {
            fabric_cells: &s.fabric_cells,
            edge_cells: &s.edge_cells,
            combined_cell_counts: &s.combined_cells,
            total_fabric_cells: s.total_fabric_cells,
            total_edge_cells: s.total_edge_cells,
            total_leakage_power_watts: s.total_leakage_watts,
            fabric_area_um2: s.fabric_area,
            die_area_um2: s.die_area,
        },
        io_pins: layout.pins.iter().map(Pin::from).collect(),
        tile_array: layout.grid.to_rows(),
        fingerprint: layout.fingerprint().to_string(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}
