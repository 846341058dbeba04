//! Wire-format mirrors of the tile library and fabric documents.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) type Extra = BTreeMap<String, Value>;

fn default_pin_extent() -> f64 {
    1.0
}

fn default_spacing() -> String {
    "auto".to_string()
}

#[derive(Deserialize)]
pub(crate) struct RawTileLibrary {
    pub tiles: Vec<RawTile>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawTile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub site: String,
    pub rows: Vec<RawTileRow>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawTileRow {
    pub row_id: u32,
    pub cells: Vec<RawCellSpec>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawCellSpec {
    #[serde(rename = "type")]
    pub alias: String,
    pub count: u32,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawFabric {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub array_dimensions: RawArray,
    pub tile_configuration: RawTileConfiguration,
    #[serde(default)]
    pub edge_cells: Option<RawEdgeCells>,
    #[serde(default)]
    pub io_ring: Option<RawIoRing>,
    #[serde(default)]
    pub margins: Option<RawMargins>,
    #[serde(default)]
    pub power_distribution: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawArray {
    pub rows: i64,
    pub cols: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawTileConfiguration {
    pub default_tile: String,
    #[serde(default)]
    pub regions: Vec<RawRegion>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawRegion {
    pub name: String,
    pub tile_type: String,
    pub area: RawArea,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawArea {
    pub row_start: u32,
    pub col_start: u32,
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawEdgeCells {
    #[serde(default)]
    pub left: Option<RawEdgeSide>,
    #[serde(default)]
    pub right: Option<RawEdgeSide>,
    #[serde(default)]
    pub top: Option<RawEdgeSide>,
    #[serde(default)]
    pub bottom: Option<RawEdgeSide>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawEdgeSide {
    pub enable: bool,
    pub cell: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawIoRing {
    #[serde(default)]
    pub pin_size: Option<RawPinSize>,
    #[serde(default)]
    pub edges: IndexMap<String, RawIoEdge>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawPinSize {
    #[serde(default = "default_pin_extent")]
    pub width: f64,
    #[serde(default = "default_pin_extent")]
    pub height: f64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawIoEdge {
    #[serde(default = "default_spacing")]
    pub spacing: String,
    #[serde(default)]
    pub pins: Vec<RawIoPin>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawIoPin {
    pub name: String,
    #[serde(rename = "type")]
    pub pin_type: String,
    pub direction: String,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawMargins {
    pub horizontal: f64,
    pub vertical: f64,
    #[serde(flatten)]
    pub extra: Extra,
}
