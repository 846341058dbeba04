//! The validated technology catalog and its alias/name indices.

use crate::ids::CellId;
use crate::types::{CellCategory, CellDefinition, LayerInfo, Site, Units};
use fabgen_common::{DocumentKind, FabricError};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// The technology catalog: site, layers, unit scales, and standard cells.
///
/// Construction through [`Technology::new`] guarantees that aliases and
/// names are unique, that the site has a positive size, and that every cell
/// is at least one site wide and one row tall.
#[derive(Clone, Debug)]
pub struct Technology {
    name: String,
    version: String,
    description: String,
    units: Units,
    site: Site,
    cells: Vec<CellDefinition>,
    layers: IndexMap<String, LayerInfo>,
    by_alias: HashMap<String, CellId>,
    by_name: HashMap<String, CellId>,
}

impl Technology {
    /// Builds a technology catalog, rejecting duplicate or degenerate cells.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        units: Units,
        site: Site,
        cells: Vec<CellDefinition>,
        layers: IndexMap<String, LayerInfo>,
    ) -> Result<Self, FabricError> {
        if site.width.is_nan() || site.width <= 0.0 {
            return Err(FabricError::degenerate("site.width", site.width));
        }
        if site.height.is_nan() || site.height <= 0.0 {
            return Err(FabricError::degenerate("site.height", site.height));
        }
        if units.distance == 0 {
            return Err(FabricError::degenerate("units.distance", units.distance));
        }

        let mut by_alias = HashMap::with_capacity(cells.len());
        let mut by_name = HashMap::with_capacity(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            let id = CellId::from_raw(i as u32);
            if cell.width == 0 {
                return Err(FabricError::degenerate(format!("cells[{i}].width"), 0));
            }
            if cell.height == 0 {
                return Err(FabricError::degenerate(format!("cells[{i}].height"), 0));
            }
            if by_alias.insert(cell.alias.clone(), id).is_some() {
                return Err(FabricError::malformed(
                    DocumentKind::Technology,
                    format!("cells[{i}].alias"),
                    format!("duplicate cell alias '{}'", cell.alias),
                ));
            }
            if by_name.insert(cell.name.clone(), id).is_some() {
                return Err(FabricError::malformed(
                    DocumentKind::Technology,
                    format!("cells[{i}].name"),
                    format!("duplicate cell name '{}'", cell.name),
                ));
            }
        }

        Ok(Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            units,
            site,
            cells,
            layers,
            by_alias,
            by_name,
        })
    }

    /// Technology name (e.g. `sky130`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Technology version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit scales.
    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Placement site.
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// All cells in document order.
    pub fn cells(&self) -> &[CellDefinition] {
        &self.cells
    }

    /// Routing layers in document order.
    pub fn layers(&self) -> &IndexMap<String, LayerInfo> {
        &self.layers
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: CellId) -> &CellDefinition {
        &self.cells[id.as_raw() as usize]
    }

    /// Looks up a cell ID by alias.
    pub fn cell_id(&self, alias: &str) -> Option<CellId> {
        self.by_alias.get(alias).copied()
    }

    /// Looks up a cell by alias.
    pub fn cell_by_alias(&self, alias: &str) -> Option<&CellDefinition> {
        self.cell_id(alias).map(|id| self.cell(id))
    }

    /// Looks up a cell by alias, failing with [`FabricError::UnknownCellAlias`].
    ///
    /// `referrer` describes who asked for the alias and is only evaluated on failure.
    pub fn require_alias(
        &self,
        alias: &str,
        referrer: impl FnOnce() -> String,
    ) -> Result<(CellId, &CellDefinition), FabricError> {
        match self.cell_id(alias) {
            Some(id) => Ok((id, self.cell(id))),
            None => Err(FabricError::UnknownCellAlias {
                alias: alias.to_string(),
                referrer: referrer(),
            }),
        }
    }

    /// Reverse lookup: the alias of the cell with library name `name`.
    pub fn alias_for_name(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&id| self.cell(id).alias.as_str())
    }

    /// Looks up a cell by library name.
    pub fn cell_by_name(&self, name: &str) -> Option<&CellDefinition> {
        self.by_name.get(name).map(|&id| self.cell(id))
    }

    /// Number of cells per category.
    pub fn category_breakdown(&self) -> BTreeMap<CellCategory, usize> {
        let mut counts = BTreeMap::new();
        for cell in &self.cells {
            *counts.entry(cell.category).or_insert(0) += 1;
        }
        counts
    }
}
