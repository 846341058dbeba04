//! Edge cells resolved against the technology.

use fabgen_common::FabricError;
use fabgen_spec::{FabricSpec, Side};
use fabgen_tech::{CellId, Technology};

/// The technology cell placed along one side of the core.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeCell {
    /// The side it lines.
    pub side: Side,
    /// Technology alias used in instance names.
    pub alias: String,
    /// Resolved cell.
    pub cell: CellId,
    /// Technology cell name written as the instance's cell type.
    pub cell_name: String,
    /// Width in sites.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
}

/// Enabled edge cells for all four sides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeCellSet {
    sides: [Option<EdgeCell>; 4],
}

fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
        Side::Top => 2,
        Side::Bottom => 3,
    }
}

impl EdgeCellSet {
    /// Resolves every enabled side of `spec` against `tech`.
    pub fn resolve(tech: &Technology, spec: &FabricSpec) -> Result<Self, FabricError> {
        let mut set = Self::default();
        for side in Side::ALL {
            let Some(alias) = spec.edge_cell(side) else {
                continue;
            };
            let (id, cell) = tech.require_alias(alias, || format!("{side} edge cells"))?;
            set.sides[slot(side)] = Some(EdgeCell {
                side,
                alias: alias.to_string(),
                cell: id,
                cell_name: cell.name.clone(),
                width: cell.width,
                height: cell.height,
            });
        }
        Ok(set)
    }

    /// The cell on `side`, when enabled.
    pub fn get(&self, side: Side) -> Option<&EdgeCell> {
        self.sides[slot(side)].as_ref()
    }

    /// Width in sites of the cell on `side`, or 0 when disabled.
    pub fn width(&self, side: Side) -> u32 {
        self.get(side).map_or(0, |c| c.width)
    }

    /// Height in rows of the cell on `side`, or 0 when disabled.
    pub fn height(&self, side: Side) -> u32 {
        self.get(side).map_or(0, |c| c.height)
    }

    /// Enabled sides in placement order (left, right, top, bottom).
    pub fn iter(&self) -> impl Iterator<Item = &EdgeCell> {
        self.sides.iter().flatten()
    }
}
