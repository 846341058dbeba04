//! Fabric generation engine.
//!
//! Turns a [`ValidatedFabric`] into a fully placed [`FabricLayout`]:
//!
//! 1. **Overlay**: the default tile everywhere, then regions in order
//! 2. **Dimensions**: fabric, core and die extents from the default tile,
//!    edge cells and margins
//! 3. **Placement**: tile expansion, then edge-cell runs
//! 4. **Pins**: I/O ring placement around the die
//! 5. **Statistics**: counts, leakage and areas
//!
//! # Usage
//!
//! ```ignore
//! use fabgen_engine::{generate_fabric, GenerateOptions};
//!
//! let validated = fabgen_spec::validate(&tech, &tiles, &spec, &sink)?;
//! let layout = generate_fabric(validated, &GenerateOptions::default(), &sink)?;
//! println!("{} cells", layout.instance_count());
//! ```

#![warn(missing_docs)]

pub mod dimensions;
pub mod edges;
pub mod grid;
pub mod ids;
pub mod layout;
pub mod pins;
pub mod placement;
pub mod stats;

pub use dimensions::FabricDimensions;
pub use edges::{EdgeCell, EdgeCellSet};
pub use grid::TileGrid;
pub use ids::InstanceId;
pub use layout::{CellInstance, FabricLayout, InstanceOrigin, PlacedPin};
pub use pins::place_pins;
pub use placement::{edge_runs, place_edge_cells, place_fabric_cells, EdgeRun, RunAxis};
pub use stats::{display_alias, FabricStats};

use fabgen_common::FabricError;
use fabgen_diagnostics::{code, Diagnostic, DiagnosticSink};
use fabgen_spec::ValidatedFabric;

/// Options for [`generate_fabric`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Expand tiles on the rayon thread pool.
    pub parallel: bool,
}

/// Runs the full generation pipeline on validated inputs.
///
/// Progress is reported to `sink` as notes. Any error aborts the run; no
/// partial layout is returned.
pub fn generate_fabric(
    fabric: ValidatedFabric<'_>,
    options: &GenerateOptions,
    sink: &DiagnosticSink,
) -> Result<FabricLayout, FabricError> {
    let tech = fabric.technology();
    let spec = fabric.spec();

    let grid = TileGrid::from_config(spec.array(), spec.tile_configuration());
    let default_tile = fabric.default_tile()?;
    let edges = EdgeCellSet::resolve(tech, spec)?;
    let dims = FabricDimensions::compute(
        spec.array(),
        default_tile,
        &edges,
        tech.site(),
        spec.margins(),
    );
    sink.emit(Diagnostic::note(
        code::STAGE_PROGRESS,
        format!(
            "calculated dimensions - core: {:.2}x{:.2}um, die: {:.2}x{:.2}um",
            dims.core_width, dims.core_height, dims.die_width, dims.die_height
        ),
    ));

    let fabric_cells = place_fabric_cells(tech, fabric.tiles(), &grid, &dims, options.parallel)?;
    let edge_cells = place_edge_cells(&dims, &edges);
    let pins = place_pins(spec.io_ring(), &dims)?;
    sink.emit(Diagnostic::note(
        code::STAGE_PROGRESS,
        format!(
            "placed {} fabric cells, {} edge cells and {} I/O pins",
            fabric_cells.len(),
            edge_cells.len(),
            pins.len()
        ),
    ));

    let stats = FabricStats::compute(tech, &fabric_cells, &edge_cells, &dims);
    Ok(FabricLayout::new(
        spec.name(),
        tech.units().distance,
        &tech.site().name,
        grid,
        dims,
        fabric_cells,
        edge_cells,
        pins,
        stats,
        spec.power_distribution().cloned(),
    ))
}
