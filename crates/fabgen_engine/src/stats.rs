//! Cell counts, leakage power and areas.

use crate::dimensions::FabricDimensions;
use crate::layout::CellInstance;
use fabgen_tech::Technology;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics of a layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FabricStats {
    /// Fabric instances per cell alias.
    pub fabric_cells: BTreeMap<String, u64>,
    /// Edge instances per `{alias}_{side}`.
    pub edge_cells: BTreeMap<String, u64>,
    /// All instances per display alias, with `DECAP*` aliases folded together.
    pub combined_cells: BTreeMap<String, u64>,
    /// Number of fabric instances.
    pub total_fabric_cells: u64,
    /// Number of edge instances.
    pub total_edge_cells: u64,
    /// Sum of cell leakage, in watts.
    pub total_leakage_watts: f64,
    /// Core area in square microns.
    pub fabric_area: f64,
    /// Die area in square microns.
    pub die_area: f64,
}

/// Maps every alias starting with `DECAP` (any case) to `DECAP`.
pub fn display_alias(alias: &str) -> &str {
    if alias.to_uppercase().starts_with("DECAP") {
        "DECAP"
    } else {
        alias
    }
}

impl FabricStats {
    /// Aggregates fabric then edge instances in one pass each.
    ///
    /// Instances are attributed by cell name; a name without an alias in
    /// `tech` is not counted. Cells without power data add no leakage.
    pub fn compute(
        tech: &Technology,
        fabric: &[CellInstance],
        edge: &[CellInstance],
        dims: &FabricDimensions,
    ) -> Self {
        let mut stats = Self {
            fabric_area: dims.core_area(),
            die_area: dims.die_area(),
            ..Self::default()
        };

        for inst in fabric {
            let Some(alias) = tech.alias_for_name(&inst.cell_type) else {
                continue;
            };
            *stats.fabric_cells.entry(alias.to_string()).or_default() += 1;
            stats.total_fabric_cells += 1;
            stats.add_combined(tech, alias);
        }

        for inst in edge {
            let Some(alias) = tech.alias_for_name(&inst.cell_type) else {
                continue;
            };
            if let Some(side) = inst.edge_side() {
                *stats
                    .edge_cells
                    .entry(format!("{alias}_{side}"))
                    .or_default() += 1;
                stats.total_edge_cells += 1;
            }
            stats.add_combined(tech, alias);
        }

        stats
    }

    fn add_combined(&mut self, tech: &Technology, alias: &str) {
        *self
            .combined_cells
            .entry(display_alias(alias).to_string())
            .or_default() += 1;
        if let Some(cell) = tech.cell_by_alias(alias) {
            self.total_leakage_watts += cell.leakage_watts();
        }
    }

    /// Total number of instances.
    pub fn total_cells(&self) -> u64 {
        self.total_fabric_cells + self.total_edge_cells
    }

    /// Combined counts sorted by count descending, then name ascending.
    pub fn ranked_combined(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self
            .combined_cells
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
