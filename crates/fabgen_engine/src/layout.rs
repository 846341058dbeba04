//! The placed fabric: cell instances, I/O pins and everything derived from them.

use crate::dimensions::FabricDimensions;
use crate::grid::TileGrid;
use crate::ids::InstanceId;
use crate::stats::FabricStats;
use fabgen_common::{to_dbu, ContentHash, FabResult, HashBuilder, InternalError};
use fabgen_spec::{IoSide, PowerDistribution, Side};
use fabgen_tech::{CellId, PinDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a cell instance came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstanceOrigin {
    /// Expanded from a tile.
    Fabric {
        /// Tile array row.
        tile_row: u32,
        /// Tile array column.
        tile_col: u32,
        /// Row inside the tile.
        row_id: u32,
        /// Position of the instance within its row, counted from the left.
        position: u32,
    },
    /// Part of an edge-cell column or row.
    Edge {
        /// The side it lines.
        side: Side,
    },
}

/// A placed standard cell. Coordinates are the lower-left corner in microns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellInstance {
    /// Position in the layout.
    pub id: InstanceId,
    /// Unique instance name.
    pub name: String,
    /// Technology cell name.
    pub cell_type: String,
    /// Resolved technology cell.
    pub cell: CellId,
    /// Lower-left x.
    pub x: f64,
    /// Lower-left y.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Fabric or edge origin.
    pub origin: InstanceOrigin,
}

impl CellInstance {
    /// The side for edge cells, `None` for fabric cells.
    pub fn edge_side(&self) -> Option<Side> {
        match self.origin {
            InstanceOrigin::Edge { side } => Some(side),
            InstanceOrigin::Fabric { .. } => None,
        }
    }
}

/// A placed I/O pin. Coordinates are the lower-left corner in microns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedPin {
    /// Pin and net name.
    pub name: String,
    /// Signal direction.
    pub direction: PinDirection,
    /// Logical pin type from the fabric specification.
    pub pin_type: String,
    /// Die edge.
    pub side: IoSide,
    /// Lower-left x.
    pub x: f64,
    /// Lower-left y.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// The result of one generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FabricLayout {
    /// Fabric name.
    pub name: String,
    /// Database units per micron used for integer output coordinates.
    pub dbu_per_micron: u32,
    /// Name of the placement site rows are built from.
    pub site_name: String,
    /// Tile names after region overlay.
    pub grid: TileGrid,
    /// Fabric, core and die extents.
    pub dimensions: FabricDimensions,
    /// Cells expanded from tiles, in generation order.
    pub fabric_cells: Vec<CellInstance>,
    /// Edge cells, sides in order left, right, top, bottom.
    pub edge_cells: Vec<CellInstance>,
    /// I/O pins, edges in document order.
    pub pins: Vec<PlacedPin>,
    /// Aggregate counts, power and areas.
    pub stats: FabricStats,
    /// Power grid metadata carried through from the fabric specification.
    pub power_distribution: Option<PowerDistribution>,
    /// Auxiliary index: instance name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub instance_by_name: HashMap<String, InstanceId>,
}

impl FabricLayout {
    /// Assembles a layout, numbering fabric cells first and edge cells after.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        dbu_per_micron: u32,
        site_name: impl Into<String>,
        grid: TileGrid,
        dimensions: FabricDimensions,
        fabric_cells: Vec<CellInstance>,
        edge_cells: Vec<CellInstance>,
        pins: Vec<PlacedPin>,
        stats: FabricStats,
        power_distribution: Option<PowerDistribution>,
    ) -> Self {
        let mut layout = Self {
            name: name.into(),
            dbu_per_micron,
            site_name: site_name.into(),
            grid,
            dimensions,
            fabric_cells,
            edge_cells,
            pins,
            stats,
            power_distribution,
            instance_by_name: HashMap::new(),
        };
        let ids = (0u32..).map(InstanceId::from_raw);
        for (cell, id) in layout
            .fabric_cells
            .iter_mut()
            .chain(layout.edge_cells.iter_mut())
            .zip(ids)
        {
            cell.id = id;
        }
        layout.rebuild_indices();
        layout
    }

    /// Rebuilds auxiliary indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.instance_by_name.clear();
        for cell in self.fabric_cells.iter().chain(&self.edge_cells) {
            self.instance_by_name.insert(cell.name.clone(), cell.id);
        }
    }

    /// Returns the instance with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this layout.
    pub fn instance(&self, id: InstanceId) -> &CellInstance {
        let index = id.as_raw() as usize;
        match index.checked_sub(self.fabric_cells.len()) {
            None => &self.fabric_cells[index],
            Some(edge) => &self.edge_cells[edge],
        }
    }

    /// Returns the instance with the given ID, or an internal error if the
    /// ID is out of range.
    pub fn try_instance(&self, id: InstanceId) -> FabResult<&CellInstance> {
        let index = id.as_raw() as usize;
        let found = match index.checked_sub(self.fabric_cells.len()) {
            None => self.fabric_cells.get(index),
            Some(edge) => self.edge_cells.get(edge),
        };
        found.ok_or_else(|| {
            InternalError::new(format!(
                "instance {} out of range for layout '{}' with {} instances",
                id.as_raw(),
                self.name,
                self.instance_count()
            ))
        })
    }

    /// Looks up an instance by name.
    ///
    /// A stale name index (entries pointing past the instance lists) yields
    /// `None` rather than panicking.
    pub fn instance_by_name(&self, name: &str) -> Option<&CellInstance> {
        let id = *self.instance_by_name.get(name)?;
        self.try_instance(id).ok()
    }

    /// All instances: fabric cells then edge cells.
    pub fn instances(&self) -> impl Iterator<Item = &CellInstance> {
        self.fabric_cells.iter().chain(&self.edge_cells)
    }

    /// Total number of instances.
    pub fn instance_count(&self) -> usize {
        self.fabric_cells.len() + self.edge_cells.len()
    }

    /// Content hash of the placement: instance names, cell types and
    /// database-unit coordinates, then pins.
    pub fn fingerprint(&self) -> ContentHash {
        let scale = self.dbu_per_micron;
        let mut h = HashBuilder::new();
        h.str(&self.name);
        h.int(self.instance_count() as i64);
        for cell in self.instances() {
            h.str(&cell.name)
                .str(&cell.cell_type)
                .int(to_dbu(cell.x, scale))
                .int(to_dbu(cell.y, scale))
                .int(to_dbu(cell.width, scale))
                .int(to_dbu(cell.height, scale));
        }
        h.int(self.pins.len() as i64);
        for pin in &self.pins {
            h.str(&pin.name)
                .str(pin.side.as_str())
                .int(to_dbu(pin.x, scale))
                .int(to_dbu(pin.y, scale))
                .int(to_dbu(pin.width, scale))
                .int(to_dbu(pin.height, scale));
        }
        h.finish()
    }
}
