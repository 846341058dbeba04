//! Wire-format mirrors of the technology document.
//!
//! These structs accept exactly what the JSON says, keep unknown keys in
//! `extra`, and are converted into validated types by the loader.

use fabgen_common::DEFAULT_UNIT_SCALE;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) type Extra = BTreeMap<String, Value>;

fn default_scale() -> u32 {
    DEFAULT_UNIT_SCALE
}

#[derive(Deserialize)]
pub(crate) struct RawTechnology {
    pub technology: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub units: Option<RawUnits>,
    pub site: RawSite,
    pub cells: Vec<RawCell>,
    #[serde(default)]
    pub layers: IndexMap<String, RawLayer>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawUnits {
    #[serde(default = "default_scale")]
    pub distance: u32,
    #[serde(default = "default_scale")]
    pub time: u32,
    #[serde(default = "default_scale")]
    pub capacitance: u32,
    #[serde(default = "default_scale")]
    pub resistance: u32,
    #[serde(default = "default_scale")]
    pub current: u32,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawSite {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawCell {
    pub name: String,
    pub alias: String,
    pub width: u32,
    pub height: u32,
    pub cell_type: String,
    #[serde(default)]
    pub pins: Option<IndexMap<String, RawPin>>,
    #[serde(default)]
    pub drive_strength: Option<u32>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub clock_pin: Option<String>,
    #[serde(default)]
    pub spacing_rule: Option<u32>,
    #[serde(default)]
    pub timing: Option<Value>,
    #[serde(default)]
    pub power: Option<RawPower>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawPin {
    pub direction: String,
    #[serde(default)]
    pub capacitance: Option<f64>,
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub max_capacitance: Option<f64>,
    #[serde(default)]
    pub max_fanout: Option<u32>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
    #[serde(default)]
    pub clock: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawPower {
    pub leakage: f64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
pub(crate) struct RawLayer {
    pub direction: String,
    pub pitch: f64,
    pub min_width: f64,
    #[serde(default)]
    pub programmable: bool,
    #[serde(flatten)]
    pub extra: Extra,
}
