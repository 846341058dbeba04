//! The top-level fabric specification and its optional sections.
//!
//! Optional sections are `Option`s of fully validated types, and per-edge pin
//! spacing is an enum whose manual variant cannot exist without positions.

use fabgen_common::{DocumentKind, FabricError};
use fabgen_tech::PinDirection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the tile array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ArrayDimensions {
    rows: u32,
    cols: u32,
}

impl ArrayDimensions {
    /// Builds array dimensions, rejecting non-positive values.
    pub fn new(rows: i64, cols: i64) -> Result<Self, FabricError> {
        let rows = positive_u32("array_dimensions.rows", rows)?;
        let cols = positive_u32("array_dimensions.cols", cols)?;
        Ok(Self { rows, cols })
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }
}

fn positive_u32(field: &str, value: i64) -> Result<u32, FabricError> {
    if value <= 0 {
        return Err(FabricError::degenerate(field, value));
    }
    u32::try_from(value).map_err(|_| {
        FabricError::malformed(
            DocumentKind::FabricSpec,
            field,
            format!("{value} is too large"),
        )
    })
}

/// A rectangle of the tile array, in tile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegionArea {
    /// First covered row.
    pub row_start: u32,
    /// First covered column.
    pub col_start: u32,
    /// Number of covered columns.
    pub width: u32,
    /// Number of covered rows.
    pub height: u32,
}

impl RegionArea {
    /// Builds an area, rejecting a zero width or height.
    ///
    /// `path` is the dotted location of the area, used in the error.
    pub fn new(
        path: &str,
        row_start: u32,
        col_start: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, FabricError> {
        if width == 0 {
            return Err(FabricError::degenerate(format!("{path}.width"), width));
        }
        if height == 0 {
            return Err(FabricError::degenerate(format!("{path}.height"), height));
        }
        Ok(Self {
            row_start,
            col_start,
            width,
            height,
        })
    }

    /// Returns `true` if the area covers no tile.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the last covered row.
    pub fn row_end(&self) -> u32 {
        self.row_start.saturating_add(self.height)
    }

    /// One past the last covered column.
    pub fn col_end(&self) -> u32 {
        self.col_start.saturating_add(self.width)
    }

    /// Returns `true` if the two rectangles share a tile.
    ///
    /// Rectangles that merely touch along an edge do not overlap, and an
    /// empty area overlaps nothing.
    pub fn overlaps(&self, other: &RegionArea) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.col_end() <= other.col_start
            || other.col_end() <= self.col_start
            || self.row_end() <= other.row_start
            || other.row_end() <= self.row_start)
    }

    /// Returns `true` if the rectangle lies inside a `rows` x `cols` array.
    pub fn fits_within(&self, dims: &ArrayDimensions) -> bool {
        self.row_end() <= dims.rows() && self.col_end() <= dims.cols()
    }

    /// Iterates over every covered `(row, col)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.row_start..self.row_end())
            .flat_map(move |row| (self.col_start..self.col_end()).map(move |col| (row, col)))
    }
}

/// A rectangular override of the default tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Region name, used in diagnostics.
    pub name: String,
    /// Tile placed in every covered grid cell.
    pub tile_type: String,
    /// Covered rectangle.
    pub area: RegionArea,
}

/// Default tile plus ordered region overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileConfiguration {
    /// Tile used wherever no region applies.
    pub default_tile: String,
    /// Overrides, applied in declaration order.
    pub regions: Vec<Region>,
}

/// A side of the core that can carry a column or row of edge cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left column.
    Left,
    /// Right column.
    Right,
    /// Top row.
    Top,
    /// Bottom row.
    Bottom,
}

impl Side {
    /// All sides in generation order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Lowercase document spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    /// Uppercase spelling used in instance names.
    pub fn upper(self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
            Side::Top => "TOP",
            Side::Bottom => "BOTTOM",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge-cell policy for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeCellSide {
    /// Whether cells are placed on this side.
    pub enable: bool,
    /// Technology alias of the cell.
    pub cell: String,
}

/// Edge-cell policy for all four sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EdgeCells {
    /// Left side.
    pub left: Option<EdgeCellSide>,
    /// Right side.
    pub right: Option<EdgeCellSide>,
    /// Top side.
    pub top: Option<EdgeCellSide>,
    /// Bottom side.
    pub bottom: Option<EdgeCellSide>,
}

impl EdgeCells {
    /// Returns the configuration of `side`, if declared.
    pub fn side(&self, side: Side) -> Option<&EdgeCellSide> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
            Side::Top => self.top.as_ref(),
            Side::Bottom => self.bottom.as_ref(),
        }
    }

    /// Returns the cell alias of `side` when the side is declared and enabled.
    pub fn enabled(&self, side: Side) -> Option<&str> {
        self.side(side)
            .filter(|s| s.enable)
            .map(|s| s.cell.as_str())
    }
}

/// A die edge carrying I/O pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoSide {
    /// Top edge; pins spread along x.
    North,
    /// Bottom edge; pins spread along x.
    South,
    /// Right edge; pins spread along y.
    East,
    /// Left edge; pins spread along y.
    West,
}

impl IoSide {
    /// Parses the lowercase document spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "north" => Some(IoSide::North),
            "south" => Some(IoSide::South),
            "east" => Some(IoSide::East),
            "west" => Some(IoSide::West),
            _ => None,
        }
    }

    /// Lowercase document spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            IoSide::North => "north",
            IoSide::South => "south",
            IoSide::East => "east",
            IoSide::West => "west",
        }
    }

    /// Returns `true` for edges whose pins are distributed along x.
    pub fn is_horizontal(self) -> bool {
        matches!(self, IoSide::North | IoSide::South)
    }
}

impl fmt::Display for IoSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle drawn for every I/O pin, in microns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PinSize {
    width: f64,
    height: f64,
}

impl PinSize {
    /// Builds a pin size, rejecting non-positive values.
    pub fn new(width: f64, height: f64) -> Result<Self, FabricError> {
        if width.is_nan() || width <= 0.0 {
            return Err(FabricError::degenerate("io_ring.pin_size.width", width));
        }
        if height.is_nan() || height <= 0.0 {
            return Err(FabricError::degenerate("io_ring.pin_size.height", height));
        }
        Ok(Self { width, height })
    }

    /// Pin width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pin height.
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for PinSize {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// An I/O pin as declared in the fabric specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IoPin {
    /// Pin and net name.
    pub name: String,
    /// Logical pin type (e.g. `signal`, `clock`).
    pub pin_type: String,
    /// Signal direction.
    pub direction: PinDirection,
}

/// A manually positioned I/O pin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ManualPin {
    /// The pin.
    pub pin: IoPin,
    /// Center of the pin along its edge, in microns from the die origin.
    pub position: f64,
}

/// How pins are distributed along an edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Spacing {
    /// Evenly spread inside the margin band.
    Auto(Vec<IoPin>),
    /// Centered on declared positions.
    Manual(Vec<ManualPin>),
}

impl Spacing {
    /// Number of pins on the edge.
    pub fn len(&self) -> usize {
        match self {
            Spacing::Auto(pins) => pins.len(),
            Spacing::Manual(pins) => pins.len(),
        }
    }

    /// Returns `true` if the edge has no pins.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One edge of the I/O ring.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IoEdge {
    /// Which die edge.
    pub side: IoSide,
    /// Pins and their spacing mode.
    pub spacing: Spacing,
}

/// Pins placed around the die boundary.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IoRing {
    /// Rectangle drawn for every pin.
    pub pin_size: PinSize,
    /// Edges in document order.
    pub edges: Vec<IoEdge>,
}

impl IoRing {
    /// Total number of declared pins.
    pub fn pin_count(&self) -> usize {
        self.edges.iter().map(|e| e.spacing.len()).sum()
    }
}

/// Clearance between the core and the die boundary, in microns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Margins {
    horizontal: f64,
    vertical: f64,
}

impl Margins {
    /// Builds margins, rejecting non-positive values.
    pub fn new(horizontal: f64, vertical: f64) -> Result<Self, FabricError> {
        if horizontal.is_nan() || horizontal <= 0.0 {
            return Err(FabricError::degenerate("margins.horizontal", horizontal));
        }
        if vertical.is_nan() || vertical <= 0.0 {
            return Err(FabricError::degenerate("margins.vertical", vertical));
        }
        Ok(Self {
            horizontal,
            vertical,
        })
    }

    /// Left and right margin.
    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    /// Top and bottom margin.
    pub fn vertical(&self) -> f64 {
        self.vertical
    }
}

/// A scalar attribute of a power rail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RailValue {
    /// Numeric attribute (width, pitch, offset).
    Number(f64),
    /// Textual attribute (layer name).
    Text(String),
}

/// Attributes of one supply rail, in document order.
pub type PowerRail = IndexMap<String, RailValue>;

/// A supply grid with at least one of its two rails.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerGrid {
    /// Supply rail.
    #[serde(rename = "VDD", skip_serializing_if = "Option::is_none")]
    pub vdd: Option<PowerRail>,
    /// Ground rail.
    #[serde(rename = "VSS", skip_serializing_if = "Option::is_none")]
    pub vss: Option<PowerRail>,
}

/// Advisory power distribution metadata.
///
/// It does not influence placement and is carried through to reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerDistribution {
    /// Primary grid.
    pub primary_grid: PowerGrid,
    /// Secondary grid.
    pub secondary_grid: PowerGrid,
}

/// The validated fabric specification.
///
/// [`FabricSpec::new`] guarantees that margins are present whenever any I/O
/// edge declares pins.
#[derive(Clone, Debug, PartialEq)]
pub struct FabricSpec {
    name: String,
    description: String,
    array: ArrayDimensions,
    tile_configuration: TileConfiguration,
    edge_cells: Option<EdgeCells>,
    io_ring: Option<IoRing>,
    margins: Option<Margins>,
    power_distribution: Option<PowerDistribution>,
}

impl FabricSpec {
    /// Builds a fabric specification.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        array: ArrayDimensions,
        tile_configuration: TileConfiguration,
        edge_cells: Option<EdgeCells>,
        io_ring: Option<IoRing>,
        margins: Option<Margins>,
        power_distribution: Option<PowerDistribution>,
    ) -> Result<Self, FabricError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FabricError::malformed(
                DocumentKind::FabricSpec,
                "name",
                "fabric name must not be empty",
            ));
        }
        let has_pins = io_ring.as_ref().is_some_and(|r| r.pin_count() > 0);
        if has_pins && margins.is_none() {
            return Err(FabricError::malformed(
                DocumentKind::FabricSpec,
                "margins",
                "Margins must be specified when I/O pins are defined",
            ));
        }
        Ok(Self {
            name,
            description: description.into(),
            array,
            tile_configuration,
            edge_cells,
            io_ring,
            margins,
            power_distribution,
        })
    }

    /// Returns a copy with every I/O pin drawn at `pin_size`.
    ///
    /// Creates an empty I/O ring when none is declared.
    pub fn with_pin_size(mut self, pin_size: PinSize) -> Self {
        self.io_ring.get_or_insert_with(IoRing::default).pin_size = pin_size;
        self
    }

    /// Fabric name, used as the DEF design and LEF macro name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tile array size.
    pub fn array(&self) -> &ArrayDimensions {
        &self.array
    }

    /// Default tile and regions.
    pub fn tile_configuration(&self) -> &TileConfiguration {
        &self.tile_configuration
    }

    /// Edge-cell policy, if declared.
    pub fn edge_cells(&self) -> Option<&EdgeCells> {
        self.edge_cells.as_ref()
    }

    /// Alias of the edge cell on `side`, when declared and enabled.
    pub fn edge_cell(&self, side: Side) -> Option<&str> {
        self.edge_cells.as_ref().and_then(|e| e.enabled(side))
    }

    /// I/O ring, if declared.
    pub fn io_ring(&self) -> Option<&IoRing> {
        self.io_ring.as_ref()
    }

    /// Margins, if declared.
    pub fn margins(&self) -> Option<&Margins> {
        self.margins.as_ref()
    }

    /// Power distribution metadata, if declared and well-formed.
    pub fn power_distribution(&self) -> Option<&PowerDistribution> {
        self.power_distribution.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabgen_common::ErrorKind;

    fn area(row_start: u32, col_start: u32, width: u32, height: u32) -> RegionArea {
        RegionArea {
            row_start,
            col_start,
            width,
            height,
        }
    }

    fn tiles() -> TileConfiguration {
        TileConfiguration {
            default_tile: "logic".to_string(),
            regions: Vec::new(),
        }
    }

    fn ring_with_pin() -> IoRing {
        IoRing {
            pin_size: PinSize::default(),
            edges: vec![IoEdge {
                side: IoSide::North,
                spacing: Spacing::Auto(vec![IoPin {
                    name: "clk".to_string(),
                    pin_type: "clock".to_string(),
                    direction: PinDirection::Input,
                }]),
            }],
        }
    }

    #[test]
    fn array_dimensions_must_be_positive() {
        assert!(ArrayDimensions::new(2, 3).is_ok());
        let err = ArrayDimensions::new(0, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputedDegenerate);
        let err = ArrayDimensions::new(2, -1).unwrap_err();
        assert_eq!(err.to_string(), "array_dimensions.cols must be positive, got -1");
    }

    #[test]
    fn overlap_is_strict() {
        let a = area(0, 0, 2, 2);
        assert!(a.overlaps(&area(1, 1, 2, 2)));
        assert!(!a.overlaps(&area(0, 2, 1, 1)), "touching columns");
        assert!(!a.overlaps(&area(2, 0, 1, 1)), "touching rows");
        assert!(a.overlaps(&a));
    }

    #[test]
    fn zero_sized_area_is_degenerate() {
        let err = RegionArea::new("regions[1].area", 1, 1, 0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputedDegenerate);
        assert_eq!(err.to_string(), "regions[1].area.width must be positive, got 0");
        let err = RegionArea::new("regions[1].area", 1, 1, 1, 0).unwrap_err();
        assert!(err.to_string().starts_with("regions[1].area.height"));
        assert_eq!(RegionArea::new("r", 1, 2, 3, 4).unwrap(), area(1, 2, 3, 4));
    }

    #[test]
    fn empty_area_overlaps_nothing() {
        let big = area(0, 0, 3, 3);
        let empty = area(1, 1, 0, 1);
        assert!(!big.overlaps(&empty));
        assert!(!empty.overlaps(&big));
        assert_eq!(empty.cells().count(), 0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (area(0, 0, 3, 1), area(0, 2, 2, 2)),
            (area(1, 1, 1, 1), area(0, 0, 3, 3)),
            (area(0, 0, 1, 1), area(1, 1, 1, 1)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn region_bounds() {
        let dims = ArrayDimensions::new(4, 4).unwrap();
        assert!(area(2, 2, 2, 2).fits_within(&dims));
        assert!(!area(3, 0, 1, 2).fits_within(&dims));
        assert_eq!(area(1, 2, 2, 1).cells().collect::<Vec<_>>(), vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn edge_cells_enabled() {
        let edges = EdgeCells {
            left: Some(EdgeCellSide {
                enable: true,
                cell: "TAP".to_string(),
            }),
            right: Some(EdgeCellSide {
                enable: false,
                cell: "TAP".to_string(),
            }),
            ..EdgeCells::default()
        };
        assert_eq!(edges.enabled(Side::Left), Some("TAP"));
        assert_eq!(edges.enabled(Side::Right), None);
        assert_eq!(edges.enabled(Side::Top), None);
    }

    #[test]
    fn pins_require_margins() {
        let dims = ArrayDimensions::new(1, 1).unwrap();
        let err = FabricSpec::new("f", "", dims, tiles(), None, Some(ring_with_pin()), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("Margins must be specified"));

        let margins = Margins::new(5.0, 5.0).unwrap();
        assert!(FabricSpec::new(
            "f",
            "",
            dims,
            tiles(),
            None,
            Some(ring_with_pin()),
            Some(margins),
            None
        )
        .is_ok());
    }

    #[test]
    fn empty_ring_needs_no_margins() {
        let dims = ArrayDimensions::new(1, 1).unwrap();
        let spec =
            FabricSpec::new("f", "", dims, tiles(), None, Some(IoRing::default()), None, None)
                .unwrap();
        assert_eq!(spec.io_ring().unwrap().pin_count(), 0);
    }

    #[test]
    fn margins_must_be_positive() {
        assert!(Margins::new(1.0, 0.5).is_ok());
        assert_eq!(
            Margins::new(0.0, 1.0).unwrap_err().kind(),
            ErrorKind::ComputedDegenerate
        );
        assert!(Margins::new(1.0, -2.0).is_err());
    }

    #[test]
    fn pin_size_override_creates_ring() {
        let dims = ArrayDimensions::new(1, 1).unwrap();
        let spec = FabricSpec::new("f", "", dims, tiles(), None, None, None, None)
            .unwrap()
            .with_pin_size(PinSize::new(2.0, 1.5).unwrap());
        let ring = spec.io_ring().unwrap();
        assert_eq!(ring.pin_size.width(), 2.0);
        assert_eq!(ring.pin_size.height(), 1.5);
        assert!(ring.edges.is_empty());
    }

    #[test]
    fn side_spellings() {
        assert_eq!(Side::Bottom.upper(), "BOTTOM");
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(IoSide::parse("east"), Some(IoSide::East));
        assert_eq!(IoSide::parse("up"), None);
        assert!(IoSide::South.is_horizontal());
        assert!(!IoSide::West.is_horizontal());
    }
}
