//! Fabric, core and die extents.

use crate::edges::EdgeCellSet;
use fabgen_spec::{ArrayDimensions, Margins, Side, Tile};
use fabgen_tech::Site;
use serde::{Deserialize, Serialize};

/// Every extent derived from the array size, the default tile, the edge
/// cells and the margins. Lengths are in microns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FabricDimensions {
    /// Tile array rows.
    pub tile_array_rows: u32,
    /// Tile array columns.
    pub tile_array_cols: u32,
    /// Placement rows covered by tiles.
    pub fabric_rows: u64,
    /// Sites per placement row covered by tiles.
    pub fabric_sites: u64,
    /// Core width including left and right edge cells.
    pub core_width: f64,
    /// Core height including top and bottom edge cells.
    pub core_height: f64,
    /// Core width plus both horizontal margins.
    pub die_width: f64,
    /// Core height plus both vertical margins.
    pub die_height: f64,
    /// Left and right margin.
    pub margin_horizontal: f64,
    /// Top and bottom margin.
    pub margin_vertical: f64,
    /// Site width.
    pub site_width: f64,
    /// Site height.
    pub site_height: f64,
    /// Left edge cell width in sites.
    pub edge_left: u32,
    /// Right edge cell width in sites.
    pub edge_right: u32,
    /// Top edge cell height in rows.
    pub edge_top: u32,
    /// Bottom edge cell height in rows.
    pub edge_bottom: u32,
}

impl FabricDimensions {
    /// Computes the extents.
    ///
    /// Fabric size comes from the default tile only; regions with a
    /// different footprint do not change it.
    pub fn compute(
        array: &ArrayDimensions,
        default_tile: &Tile,
        edges: &EdgeCellSet,
        site: &Site,
        margins: Option<&Margins>,
    ) -> Self {
        let fabric_rows = u64::from(array.rows()) * u64::from(default_tile.height());
        let fabric_sites = u64::from(array.cols()) * u64::from(default_tile.width());

        let edge_left = edges.width(Side::Left);
        let edge_right = edges.width(Side::Right);
        let edge_top = edges.height(Side::Top);
        let edge_bottom = edges.height(Side::Bottom);

        let core_width =
            (fabric_sites + u64::from(edge_left) + u64::from(edge_right)) as f64 * site.width;
        let core_height =
            (fabric_rows + u64::from(edge_top) + u64::from(edge_bottom)) as f64 * site.height;

        let margin_horizontal = margins.map_or(0.0, Margins::horizontal);
        let margin_vertical = margins.map_or(0.0, Margins::vertical);

        Self {
            tile_array_rows: array.rows(),
            tile_array_cols: array.cols(),
            fabric_rows,
            fabric_sites,
            core_width,
            core_height,
            die_width: core_width + 2.0 * margin_horizontal,
            die_height: core_height + 2.0 * margin_vertical,
            margin_horizontal,
            margin_vertical,
            site_width: site.width,
            site_height: site.height,
            edge_left,
            edge_right,
            edge_top,
            edge_bottom,
        }
    }

    /// Core area in square microns.
    pub fn core_area(&self) -> f64 {
        self.core_width * self.core_height
    }

    /// Die area in square microns.
    pub fn die_area(&self) -> f64 {
        self.die_width * self.die_height
    }

    /// Lower-left corner of the tile array.
    pub fn fabric_origin(&self) -> (f64, f64) {
        (
            self.margin_horizontal + f64::from(self.edge_left) * self.site_width,
            self.margin_vertical + f64::from(self.edge_bottom) * self.site_height,
        )
    }
}
