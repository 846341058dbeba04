//! Tile expansion into fabric cell instances.

use crate::dimensions::FabricDimensions;
use crate::grid::TileGrid;
use crate::ids::InstanceId;
use crate::layout::{CellInstance, InstanceOrigin};
use fabgen_common::FabricError;
use fabgen_spec::{Tile, TileLibrary};
use fabgen_tech::Technology;
use rayon::prelude::*;

/// Expands every grid position into cell instances.
///
/// Order is grid row-major, then tile rows in declaration order, then cells
/// left to right. With `parallel` each tile is expanded on the rayon pool
/// and the per-tile segments are concatenated in grid order, so the result
/// is the same as the sequential path.
pub fn place_fabric_cells(
    tech: &Technology,
    tiles: &TileLibrary,
    grid: &TileGrid,
    dims: &FabricDimensions,
    parallel: bool,
) -> Result<Vec<CellInstance>, FabricError> {
    let positions: Vec<(u32, u32, &str)> = grid.iter().collect();
    let expand = |&(row, col, name): &(u32, u32, &str)| {
        let tile = tiles.require(name, || format!("tile array position ({row}, {col})"))?;
        expand_tile(tech, tile, row, col, dims)
    };

    let segments: Vec<Vec<CellInstance>> = if parallel {
        positions.par_iter().map(expand).collect::<Result<_, _>>()?
    } else {
        positions.iter().map(expand).collect::<Result<_, _>>()?
    };
    Ok(segments.into_iter().flatten().collect())
}

fn expand_tile(
    tech: &Technology,
    tile: &Tile,
    tile_row: u32,
    tile_col: u32,
    dims: &FabricDimensions,
) -> Result<Vec<CellInstance>, FabricError> {
    let sw = dims.site_width;
    let sh = dims.site_height;
    let (x_offset, y_offset) = dims.fabric_origin();
    let tile_x = x_offset + (u64::from(tile_col) * u64::from(tile.width())) as f64 * sw;
    let tile_y = y_offset + (u64::from(tile_row) * u64::from(tile.height())) as f64 * sh;

    let mut out = Vec::with_capacity(tile.cell_count() as usize);
    for row in tile.rows() {
        let row_y = tile_y + f64::from(row.row_id) * sh;
        let mut x = tile_x;
        let mut position = 0u32;
        for spec in &row.cells {
            let (id, cell) = tech.require_alias(&spec.alias, || {
                format!("tile '{}' row {}", tile.name(), row.row_id)
            })?;
            let width = f64::from(cell.width) * sw;
            let height = f64::from(cell.height) * sh;
            for _ in 0..spec.count {
                out.push(CellInstance {
                    id: InstanceId::from_raw(0),
                    name: format!(
                        "{}_T{tile_row}-{tile_col}_C{}-{position}",
                        spec.alias, row.row_id
                    ),
                    cell_type: cell.name.clone(),
                    cell: id,
                    x,
                    y: row_y,
                    width,
                    height,
                    origin: InstanceOrigin::Fabric {
                        tile_row,
                        tile_col,
                        row_id: row.row_id,
                        position,
                    },
                });
                x += width;
                position += 1;
            }
        }
    }
    Ok(out)
}
