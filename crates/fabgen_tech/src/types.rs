//! Value types describing sites, layers, units, and standard cells.

use fabgen_common::DEFAULT_UNIT_SCALE;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer scale factors per physical quantity.
///
/// `distance` is the number of database units per micron and drives every
/// integer coordinate written by the output writers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    /// Database units per micron.
    pub distance: u32,
    /// Time scale.
    pub time: u32,
    /// Capacitance scale.
    pub capacitance: u32,
    /// Resistance scale.
    pub resistance: u32,
    /// Current scale.
    pub current: u32,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            distance: DEFAULT_UNIT_SCALE,
            time: DEFAULT_UNIT_SCALE,
            capacitance: DEFAULT_UNIT_SCALE,
            resistance: DEFAULT_UNIT_SCALE,
            current: DEFAULT_UNIT_SCALE,
        }
    }
}

/// The smallest placement grid unit, in microns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Site name as written into DEF `ROW` records.
    pub name: String,
    /// Site width in microns.
    pub width: f64,
    /// Site height (one placement row) in microns.
    pub height: f64,
}

/// Signal direction of a cell pin or an I/O pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    /// Input pin.
    Input,
    /// Output pin.
    Output,
    /// Bidirectional pin.
    Inout,
}

impl PinDirection {
    /// Parses the lowercase document spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "input" => Some(PinDirection::Input),
            "output" => Some(PinDirection::Output),
            "inout" => Some(PinDirection::Inout),
            _ => None,
        }
    }

    /// Returns the upper-case keyword used by DEF and LEF.
    pub fn keyword(self) -> &'static str {
        match self {
            PinDirection::Input => "INPUT",
            PinDirection::Output => "OUTPUT",
            PinDirection::Inout => "INOUT",
        }
    }
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinDirection::Input => write!(f, "input"),
            PinDirection::Output => write!(f, "output"),
            PinDirection::Inout => write!(f, "inout"),
        }
    }
}

/// A pin on a standard cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellPin {
    /// Signal direction.
    pub direction: PinDirection,
    /// Input capacitance.
    pub capacitance: Option<f64>,
    /// Metal layer the pin is drawn on.
    pub layer: Option<String>,
    /// Boolean function driven by an output pin.
    pub function: Option<String>,
    /// Maximum load capacitance.
    pub max_capacitance: Option<f64>,
    /// Maximum fanout.
    pub max_fanout: Option<u32>,
    /// Pin location inside the cell.
    pub location: Option<Vec<f64>>,
    /// Whether this is a clock pin.
    pub clock: Option<bool>,
}

impl CellPin {
    /// Creates a pin with only a direction set.
    pub fn new(direction: PinDirection) -> Self {
        Self {
            direction,
            capacitance: None,
            layer: None,
            function: None,
            max_capacitance: None,
            max_fanout: None,
            location: None,
            clock: None,
        }
    }
}

/// Functional category of a standard cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellCategory {
    /// Logic gates without state.
    Combinational,
    /// Flip-flops and latches.
    Sequential,
    /// Taps, fillers, decaps, and other non-logic cells.
    Physical,
}

impl CellCategory {
    /// Parses the lowercase document spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "combinational" => Some(CellCategory::Combinational),
            "sequential" => Some(CellCategory::Sequential),
            "physical" => Some(CellCategory::Physical),
            _ => None,
        }
    }
}

impl fmt::Display for CellCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellCategory::Combinational => write!(f, "combinational"),
            CellCategory::Sequential => write!(f, "sequential"),
            CellCategory::Physical => write!(f, "physical"),
        }
    }
}

/// Static power figures of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerInfo {
    /// Leakage power in micro-watts.
    pub leakage: f64,
}

impl PowerInfo {
    /// Leakage power converted to watts.
    pub fn leakage_watts(&self) -> f64 {
        self.leakage * 1e-6
    }
}

/// A standard cell available for placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellDefinition {
    /// Full library cell name, written into placed instances.
    pub name: String,
    /// Short name used by tile rows and edge-cell configuration.
    pub alias: String,
    /// Width in sites.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
    /// Functional category.
    pub category: CellCategory,
    /// Pins keyed by name, in document order.
    pub pins: IndexMap<String, CellPin>,
    /// Relative drive strength.
    pub drive_strength: Option<u32>,
    /// Boolean function of the cell.
    pub function: Option<String>,
    /// Name of the clock pin on sequential cells.
    pub clock_pin: Option<String>,
    /// Spacing rule in sites.
    pub spacing_rule: Option<u32>,
    /// Timing data, kept as-is because its shape differs between cell categories.
    pub timing: Option<serde_json::Value>,
    /// Power figures.
    pub power: Option<PowerInfo>,
}

impl CellDefinition {
    /// Creates a cell definition with no pins and no optional data.
    pub fn new(
        name: impl Into<String>,
        alias: impl Into<String>,
        width: u32,
        height: u32,
        category: CellCategory,
    ) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            width,
            height,
            category,
            pins: IndexMap::new(),
            drive_strength: None,
            function: None,
            clock_pin: None,
            spacing_rule: None,
            timing: None,
            power: None,
        }
    }

    /// Sets the leakage power in micro-watts.
    pub fn with_leakage(mut self, leakage_uw: f64) -> Self {
        self.power = Some(PowerInfo {
            leakage: leakage_uw,
        });
        self
    }

    /// Adds a pin.
    pub fn with_pin(mut self, name: impl Into<String>, pin: CellPin) -> Self {
        self.pins.insert(name.into(), pin);
        self
    }

    /// Leakage power in watts, or zero when the cell carries no power data.
    pub fn leakage_watts(&self) -> f64 {
        self.power.map_or(0.0, |p| p.leakage_watts())
    }
}

/// Preferred routing direction of a metal layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDirection {
    /// Horizontal tracks.
    Horizontal,
    /// Vertical tracks.
    Vertical,
}

impl LayerDirection {
    /// Parses the lowercase document spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "horizontal" => Some(LayerDirection::Horizontal),
            "vertical" => Some(LayerDirection::Vertical),
            _ => None,
        }
    }
}

/// A routing layer of the process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    /// Preferred direction.
    pub direction: LayerDirection,
    /// Track pitch in microns.
    pub pitch: f64,
    /// Minimum wire width in microns.
    pub min_width: f64,
    /// Whether the layer is available for fabric programming.
    pub programmable: bool,
}
