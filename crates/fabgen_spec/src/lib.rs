//! Tile library and fabric specification documents.
//!
//! This crate reads the two layout-describing documents, turns them into
//! validated types, and cross-checks them against a
//! [`Technology`](fabgen_tech::Technology):
//!
//! - [`TileLibrary`]: reusable tile templates made of rows of cell runs
//! - [`FabricSpec`]: array size, regions, edge cells, I/O ring, margins,
//!   and optional power distribution metadata
//! - [`validate`]: the cross-document checks that must pass before generation

#![warn(missing_docs)]

pub mod fabric;
pub mod loader;
pub mod tiles;
pub mod validate;

mod raw;

pub use fabric::{
    ArrayDimensions, EdgeCellSide, EdgeCells, FabricSpec, IoEdge, IoPin, IoRing, IoSide,
    ManualPin, Margins, PinSize, PowerDistribution, PowerGrid, PowerRail, RailValue, Region,
    RegionArea, Side, Spacing, TileConfiguration,
};
pub use loader::{
    load_fabric_spec, load_fabric_spec_from_str, load_tile_library, load_tile_library_from_str,
    LoadOptions,
};
pub use tiles::{CellSpec, Tile, TileLibrary, TileRow};
pub use validate::{validate, ValidatedFabric};
