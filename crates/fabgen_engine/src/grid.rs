//! The tile-name grid produced by overlaying regions on the default tile.

use fabgen_spec::{ArrayDimensions, Region, TileConfiguration};
use serde::{Deserialize, Serialize};

/// A `rows` x `cols` matrix of tile names, stored row-major.
///
/// Row 0 is the bottom row of the fabric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: u32,
    cols: u32,
    tiles: Vec<String>,
}

impl TileGrid {
    /// Creates a grid filled with `default_tile`.
    pub fn new(dims: &ArrayDimensions, default_tile: &str) -> Self {
        let len = dims.rows() as usize * dims.cols() as usize;
        Self {
            rows: dims.rows(),
            cols: dims.cols(),
            tiles: vec![default_tile.to_string(); len],
        }
    }

    /// Creates the grid for a tile configuration: the default tile
    /// everywhere, then each region in declaration order.
    pub fn from_config(dims: &ArrayDimensions, config: &TileConfiguration) -> Self {
        let mut grid = Self::new(dims, &config.default_tile);
        for region in &config.regions {
            grid.apply_region(region);
        }
        grid
    }

    /// Overwrites every cell covered by `region` with its tile.
    ///
    /// Cells outside the array are skipped. Applying the same region twice
    /// has the same effect as applying it once.
    pub fn apply_region(&mut self, region: &Region) {
        for (row, col) in region.area.cells() {
            if let Some(slot) = self.index(row, col) {
                self.tiles[slot] = region.tile_type.clone();
            }
        }
    }

    fn index(&self, row: u32, col: u32) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Tile name at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Option<&str> {
        self.index(row, col).map(|i| self.tiles[i].as_str())
    }

    /// Iterates `(row, col, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &str)> + '_ {
        let cols = self.cols.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| ((i as u32) / cols, (i as u32) % cols, t.as_str()))
    }

    /// Number of grid cells holding `tile`.
    pub fn count_of(&self, tile: &str) -> usize {
        self.tiles.iter().filter(|t| *t == tile).count()
    }

    /// The grid as nested rows, bottom row first.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.tiles
            .chunks(self.cols.max(1) as usize)
            .map(<[String]>::to_vec)
            .collect()
    }
}
