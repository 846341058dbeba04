//! Tile templates: rows of run-length encoded cell spans.

use fabgen_common::{DocumentKind, FabricError};
use fabgen_tech::Technology;
use std::collections::HashMap;

/// A run of `count` identical cells inside a tile row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSpec {
    /// Technology alias of the cell.
    pub alias: String,
    /// Number of consecutive instances.
    pub count: u32,
}

/// One placement row of a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRow {
    /// Row index inside the tile, counted from the tile's bottom edge.
    pub row_id: u32,
    /// Cell runs in left-to-right order.
    pub cells: Vec<CellSpec>,
}

impl TileRow {
    /// Total number of cell instances in this row.
    pub fn cell_count(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.count)).sum()
    }

    /// Width of this row in sites, resolving every alias against `tech`.
    pub fn width_in(&self, tech: &Technology, tile: &str) -> Result<u64, FabricError> {
        let mut width = 0u64;
        for spec in &self.cells {
            let (_, cell) = tech.require_alias(&spec.alias, || {
                format!("tile '{tile}' row {}", self.row_id)
            })?;
            width += u64::from(spec.count) * u64::from(cell.width);
        }
        Ok(width)
    }

    /// Renders `count x alias(width)=contribution` terms joined by ` + `.
    fn breakdown(&self, tech: &Technology) -> String {
        self.cells
            .iter()
            .map(|spec| {
                let width = tech.cell_by_alias(&spec.alias).map_or(0, |c| c.width);
                format!(
                    "{}x{}({})={}",
                    spec.count,
                    spec.alias,
                    width,
                    u64::from(spec.count) * u64::from(width)
                )
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// A reusable rectangular template of cell rows, measured in sites.
///
/// [`Tile::new`] guarantees a positive footprint and exactly `height` rows
/// whose ids are a permutation of `0..height`.
/// Row widths can only be checked against a technology, see
/// [`Tile::validate_row_widths`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    name: String,
    description: String,
    width: u32,
    height: u32,
    site: String,
    rows: Vec<TileRow>,
}

impl Tile {
    /// Builds a tile, rejecting zero sizes, a row count that differs from
    /// `height`, and row ids that are not exactly `0..height`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        width: u32,
        height: u32,
        site: impl Into<String>,
        rows: Vec<TileRow>,
    ) -> Result<Self, FabricError> {
        let name = name.into();
        if width == 0 {
            return Err(FabricError::degenerate(format!("tile '{name}' width"), width));
        }
        if height == 0 {
            return Err(FabricError::degenerate(format!("tile '{name}' height"), height));
        }
        if rows.len() != height as usize {
            return Err(FabricError::malformed(
                DocumentKind::TileLibrary,
                format!("tiles.{name}.rows"),
                format!(
                    "Tile {name}: Expected {height} rows, got {}",
                    rows.len()
                ),
            ));
        }
        let mut seen = vec![false; rows.len()];
        for (i, row) in rows.iter().enumerate() {
            let problem = match seen.get_mut(row.row_id as usize) {
                Some(taken) if !*taken => {
                    *taken = true;
                    continue;
                }
                Some(_) => "is used by more than one row",
                None => "is outside the tile",
            };
            return Err(FabricError::malformed(
                DocumentKind::TileLibrary,
                format!("tiles.{name}.rows[{i}].row_id"),
                format!(
                    "Tile {name}: row_id {} {problem} (expected 0..{height})",
                    row.row_id
                ),
            ));
        }
        Ok(Self {
            name,
            description: description.into(),
            width,
            height,
            site: site.into(),
            rows,
        })
    }

    /// Tile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Width in sites.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Name of the site the tile is built on.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Rows in declaration order.
    pub fn rows(&self) -> &[TileRow] {
        &self.rows
    }

    /// Total number of cell instances in one copy of this tile.
    pub fn cell_count(&self) -> u64 {
        self.rows.iter().map(TileRow::cell_count).sum()
    }

    /// Checks that the first row matches the declared width and every other
    /// row matches the first.
    ///
    /// Unknown aliases fail with [`FabricError::UnknownCellAlias`]; width
    /// disagreements fail with [`FabricError::TileWidthMismatch`] carrying the
    /// per-row breakdown.
    pub fn validate_row_widths(&self, tech: &Technology) -> Result<(), FabricError> {
        let Some(first) = self.rows.first() else {
            return Ok(());
        };
        let first_width = first.width_in(tech, &self.name)?;

        if first_width != u64::from(self.width) {
            return Err(FabricError::TileWidthMismatch {
                tile: self.name.clone(),
                message: format!(
                    "Tile {}: Declared width {} doesn't match calculated width {} sites\n\
                     Row 0: {} = {}",
                    self.name,
                    self.width,
                    first_width,
                    first.breakdown(tech),
                    first_width
                ),
            });
        }

        for (i, row) in self.rows.iter().enumerate().skip(1) {
            let row_width = row.width_in(tech, &self.name)?;
            if row_width != first_width {
                return Err(FabricError::TileWidthMismatch {
                    tile: self.name.clone(),
                    message: format!(
                        "Tile {}: Row {i} width {row_width} sites doesn't match first row width {first_width} sites\n\
                         Row 0: {} = {first_width}\n\
                         Row {i}: {} = {row_width}",
                        self.name,
                        first.breakdown(tech),
                        row.breakdown(tech),
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The set of tile templates available to a fabric, unique by name.
#[derive(Clone, Debug, Default)]
pub struct TileLibrary {
    tiles: Vec<Tile>,
    by_name: HashMap<String, usize>,
}

impl TileLibrary {
    /// Builds a library, rejecting duplicate tile names.
    pub fn new(tiles: Vec<Tile>) -> Result<Self, FabricError> {
        let mut by_name = HashMap::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            if by_name.insert(tile.name.clone(), i).is_some() {
                return Err(FabricError::malformed(
                    DocumentKind::TileLibrary,
                    format!("tiles[{i}].name"),
                    format!("duplicate tile name '{}'", tile.name),
                ));
            }
        }
        Ok(Self { tiles, by_name })
    }

    /// All tiles in document order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the library holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Looks up a tile by name.
    pub fn get(&self, name: &str) -> Option<&Tile> {
        self.by_name.get(name).map(|&i| &self.tiles[i])
    }

    /// Looks up a tile by name, failing with [`FabricError::UnknownTile`].
    pub fn require(
        &self,
        name: &str,
        referrer: impl FnOnce() -> String,
    ) -> Result<&Tile, FabricError> {
        self.get(name).ok_or_else(|| FabricError::UnknownTile {
            tile: name.to_string(),
            referrer: referrer(),
        })
    }
}
