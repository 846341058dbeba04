//! Cross-document validation.
//!
//! [`validate`] is the gate between loading and generation. It checks the
//! three documents against each other and returns a [`ValidatedFabric`] that
//! the engine requires as input.

use crate::fabric::{FabricSpec, Side};
use crate::tiles::{Tile, TileLibrary};
use fabgen_common::{DocumentKind, FabricError};
use fabgen_diagnostics::{code, Diagnostic, DiagnosticSink, Location};
use fabgen_tech::Technology;

/// Technology, tile library and fabric specification that passed [`validate`].
#[derive(Clone, Copy, Debug)]
pub struct ValidatedFabric<'a> {
    technology: &'a Technology,
    tiles: &'a TileLibrary,
    spec: &'a FabricSpec,
}

impl<'a> ValidatedFabric<'a> {
    /// Bundles the documents without running any checks.
    ///
    /// Generation from unchecked inputs is defined (later regions overwrite
    /// earlier ones) but unknown references still fail during placement.
    pub fn unchecked(
        technology: &'a Technology,
        tiles: &'a TileLibrary,
        spec: &'a FabricSpec,
    ) -> Self {
        Self {
            technology,
            tiles,
            spec,
        }
    }

    /// The technology.
    pub fn technology(&self) -> &'a Technology {
        self.technology
    }

    /// The tile library.
    pub fn tiles(&self) -> &'a TileLibrary {
        self.tiles
    }

    /// The fabric specification.
    pub fn spec(&self) -> &'a FabricSpec {
        self.spec
    }

    /// The default tile.
    pub fn default_tile(&self) -> Result<&'a Tile, FabricError> {
        let name = &self.spec.tile_configuration().default_tile;
        self.tiles.require(name, || "the default tile".to_string())
    }
}

/// Checks the documents against each other, stopping at the first problem.
///
/// The checks run in this order:
/// 1. every tile's rows agree with its declared width
/// 2. the default tile exists
/// 3. every region's tile exists
/// 4. every enabled edge-cell alias exists (left, right, top, bottom)
/// 5. every region lies inside the tile array
/// 6. no two regions overlap
///
/// Regions whose tile footprint differs from the default tile produce a
/// warning, since fabric dimensions are derived from the default tile alone.
pub fn validate<'a>(
    technology: &'a Technology,
    tiles: &'a TileLibrary,
    spec: &'a FabricSpec,
    sink: &DiagnosticSink,
) -> Result<ValidatedFabric<'a>, FabricError> {
    for tile in tiles.tiles() {
        tile.validate_row_widths(technology)?;
    }

    let validated = ValidatedFabric::unchecked(technology, tiles, spec);
    let default = validated.default_tile()?;

    let config = spec.tile_configuration();
    for region in &config.regions {
        let tile = tiles.require(&region.tile_type, || format!("region '{}'", region.name))?;
        if tile.width() != default.width() || tile.height() != default.height() {
            sink.emit(
                Diagnostic::warning(
                    code::REGION_FOOTPRINT_MISMATCH,
                    format!(
                        "Region '{}' uses tile '{}' ({}x{} sites) but the default tile '{}' is {}x{} sites",
                        region.name,
                        tile.name(),
                        tile.width(),
                        tile.height(),
                        default.name(),
                        default.width(),
                        default.height()
                    ),
                )
                .with_location(Location::new(
                    DocumentKind::FabricSpec,
                    "tile_configuration.regions",
                ))
                .with_note("fabric dimensions are computed from the default tile"),
            );
        }
    }

    for side in Side::ALL {
        if let Some(alias) = spec.edge_cell(side) {
            technology.require_alias(alias, || format!("{side} edge cells"))?;
        }
    }

    let dims = spec.array();
    for region in &config.regions {
        if !region.area.fits_within(dims) {
            return Err(FabricError::RegionOutOfBounds {
                region: region.name.clone(),
                row_start: region.area.row_start,
                row_end: region.area.row_end(),
                col_start: region.area.col_start,
                col_end: region.area.col_end(),
                rows: dims.rows(),
                cols: dims.cols(),
            });
        }
    }

    for (i, first) in config.regions.iter().enumerate() {
        for second in &config.regions[i + 1..] {
            if first.area.overlaps(&second.area) {
                return Err(FabricError::RegionOverlap {
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }
    }

    sink.emit(Diagnostic::note(
        code::STAGE_PROGRESS,
        format!(
            "validated fabric '{}': {} tiles in library, {} regions",
            spec.name(),
            tiles.len(),
            config.regions.len()
        ),
    ));
    Ok(validated)
}
