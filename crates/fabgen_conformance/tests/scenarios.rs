//! The two worked examples: a plain 2x2 array and the same array with one
//! region override.

use fabgen_conformance::{fabric, full_pipeline, region, standard_tiles, technology};
use fabgen_engine::InstanceOrigin;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn plain_two_by_two() {
    let layout = full_pipeline(&technology(), &standard_tiles(), &fabric(2, 2, "logic"))
        .expect_layout();

    assert_eq!(layout.fabric_cells.len(), 8);
    assert!(layout.edge_cells.is_empty());
    assert!(layout.pins.is_empty());

    let d = &layout.dimensions;
    assert_eq!((d.fabric_rows, d.fabric_sites), (2, 4));
    assert!(close(d.core_width, 1.84));
    assert!(close(d.core_height, 5.44));
    assert!(close(d.die_width, d.core_width));
    assert!(close(d.die_height, d.core_height));
}

#[test]
fn plain_two_by_two_instances() {
    let layout = full_pipeline(&technology(), &standard_tiles(), &fabric(2, 2, "logic"))
        .expect_layout();

    let nand = layout.instance_by_name("NAND2_T1-1_C0-0").unwrap();
    assert_eq!(nand.cell_type, "cell_nand2");
    assert!(close(nand.x, 2.0 * 0.46));
    assert!(close(nand.y, 2.72));

    let inv = layout.instance_by_name("INV_T1-1_C0-1").unwrap();
    assert!(close(inv.x, 3.0 * 0.46));
    assert!(matches!(
        inv.origin,
        InstanceOrigin::Fabric {
            tile_row: 1,
            tile_col: 1,
            row_id: 0,
            position: 1
        }
    ));
}

#[test]
fn region_override_changes_one_grid_cell() {
    let mut spec = fabric(2, 2, "logic");
    spec["tile_configuration"]["regions"] = serde_json::json!([region("r", "fill", 0, 1, 1, 1)]);
    let base = full_pipeline(&technology(), &standard_tiles(), &fabric(2, 2, "logic"))
        .expect_layout();
    let layout = full_pipeline(&technology(), &standard_tiles(), &spec).expect_layout();

    let changed: Vec<(u32, u32)> = layout
        .grid
        .iter()
        .filter(|&(r, c, t)| base.grid.get(r, c) != Some(t))
        .map(|(r, c, _)| (r, c))
        .collect();
    assert_eq!(changed, vec![(0, 1)]);
    assert_eq!(layout.grid.get(0, 1), Some("fill"));

    // logic has two cells, fill has one
    assert_eq!(layout.fabric_cells.len(), base.fabric_cells.len() - 1);
    assert_eq!(layout.stats.fabric_cells.get("DECAP"), Some(&1));
    assert_eq!(layout.stats.fabric_cells.get("NAND2"), Some(&3));
}

#[test]
fn region_override_keeps_dimensions() {
    let mut spec = fabric(2, 2, "logic");
    spec["tile_configuration"]["regions"] = serde_json::json!([region("r", "fill", 0, 1, 1, 1)]);
    let layout = full_pipeline(&technology(), &standard_tiles(), &spec).expect_layout();
    assert!(close(layout.dimensions.core_width, 1.84));
    assert!(close(layout.dimensions.core_height, 5.44));
}
