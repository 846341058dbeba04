//! Edge-cell runs.
//!
//! Each enabled side becomes an [`EdgeRun`]: a start point, an axis, a pitch
//! and a count. Instance coordinates are `start + i * pitch * site` along the
//! axis with the other coordinate fixed.

use crate::dimensions::FabricDimensions;
use crate::edges::{EdgeCell, EdgeCellSet};
use crate::ids::InstanceId;
use crate::layout::{CellInstance, InstanceOrigin};
use fabgen_spec::Side;

/// Direction in which a run advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunAxis {
    /// Advances along x (top and bottom rows).
    Horizontal,
    /// Advances along y (left and right columns).
    Vertical,
}

/// One side's column or row of edge cells.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRun<'a> {
    /// The cell being repeated.
    pub cell: &'a EdgeCell,
    /// Lower-left corner of the first instance.
    pub start: (f64, f64),
    /// Direction of advance.
    pub axis: RunAxis,
    /// Advance per instance, in sites (horizontal) or rows (vertical).
    pub pitch: u64,
    /// Number of instances.
    pub count: u64,
}

impl EdgeRun<'_> {
    /// Lower-left corner of instance `i`.
    pub fn position(&self, i: u64, dims: &FabricDimensions) -> (f64, f64) {
        let (x, y) = self.start;
        match self.axis {
            RunAxis::Horizontal => (x + (i * self.pitch) as f64 * dims.site_width, y),
            RunAxis::Vertical => (x, y + (i * self.pitch) as f64 * dims.site_height),
        }
    }

    /// Expands the run into instances named `{alias}_EDGE_{SIDE}_{i}`.
    pub fn instances(&self, dims: &FabricDimensions) -> Vec<CellInstance> {
        let side = self.cell.side;
        let width = f64::from(self.cell.width) * dims.site_width;
        let height = f64::from(self.cell.height) * dims.site_height;
        (0..self.count)
            .map(|i| {
                let (x, y) = self.position(i, dims);
                CellInstance {
                    id: InstanceId::from_raw(0),
                    name: format!("{}_EDGE_{}_{i}", self.cell.alias, side.upper()),
                    cell_type: self.cell.cell_name.clone(),
                    cell: self.cell.cell,
                    x,
                    y,
                    width,
                    height,
                    origin: InstanceOrigin::Edge { side },
                }
            })
            .collect()
    }
}

/// Builds the runs of every enabled side, in order left, right, top, bottom.
///
/// Left and right columns have one cell per fabric row. Top and bottom rows
/// span the fabric plus both side columns and may overhang by less than one
/// cell.
pub fn edge_runs<'a>(dims: &FabricDimensions, edges: &'a EdgeCellSet) -> Vec<EdgeRun<'a>> {
    let mh = dims.margin_horizontal;
    let mv = dims.margin_vertical;
    let sw = dims.site_width;
    let sh = dims.site_height;
    let bottom = f64::from(dims.edge_bottom) * sh;
    let span = dims.fabric_sites + u64::from(dims.edge_left) + u64::from(dims.edge_right);

    edges
        .iter()
        .map(|cell| match cell.side {
            Side::Left => EdgeRun {
                cell,
                start: (mh, mv + bottom),
                axis: RunAxis::Vertical,
                pitch: 1,
                count: dims.fabric_rows,
            },
            Side::Right => EdgeRun {
                cell,
                start: (
                    mh + dims.fabric_sites as f64 * sw + f64::from(dims.edge_left) * sw,
                    mv + bottom,
                ),
                axis: RunAxis::Vertical,
                pitch: 1,
                count: dims.fabric_rows,
            },
            Side::Top => EdgeRun {
                cell,
                start: (mh, mv + dims.fabric_rows as f64 * sh + bottom),
                axis: RunAxis::Horizontal,
                pitch: u64::from(cell.width),
                count: span.div_ceil(u64::from(cell.width)),
            },
            Side::Bottom => EdgeRun {
                cell,
                start: (mh, mv),
                axis: RunAxis::Horizontal,
                pitch: u64::from(cell.width),
                count: span.div_ceil(u64::from(cell.width)),
            },
        })
        .collect()
}
