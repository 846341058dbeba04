//! Cell placement.
//!
//! Positions are fully determined by the tile rows and edge-cell policy;
//! nothing is optimized. Fabric cells are expanded tile by tile in row-major
//! grid order, then edge cells are laid out side by side.

mod edge;
mod fabric;

pub use edge::{edge_runs, EdgeRun, RunAxis};
pub use fabric::place_fabric_cells;

use crate::dimensions::FabricDimensions;
use crate::edges::EdgeCellSet;
use crate::layout::CellInstance;

/// Places edge cells for every enabled side, in order left, right, top, bottom.
pub fn place_edge_cells(dims: &FabricDimensions, edges: &EdgeCellSet) -> Vec<CellInstance> {
    edge_runs(dims, edges)
        .iter()
        .flat_map(|run| run.instances(dims))
        .collect()
}
