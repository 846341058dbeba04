//! Writer output for complete pipeline runs.

use fabgen_common::to_dbu;
use fabgen_conformance::{
    fabric, full_pipeline, full_pipeline_with, pin, region, render_all, standard_tiles,
    technology,
};
use fabgen_engine::{FabricLayout, GenerateOptions};
use fabgen_spec::LoadOptions;
use fabgen_writers::{write_outputs, OutputFormat, WriterOptions};
use serde_json::{json, Value};

fn demo_spec() -> Value {
    let mut spec = fabric(2, 3, "logic");
    spec["name"] = json!("demo");
    spec["tile_configuration"]["regions"] = json!([region("f", "fill", 1, 2, 1, 1)]);
    spec["edge_cells"] = json!({
        "left": { "enable": true, "cell": "TAP" },
        "bottom": { "enable": true, "cell": "TAP" },
        "top": { "enable": true, "cell": "DECAP4" },
    });
    spec["io_ring"] = json!({
        "edges": {
            "north": { "spacing": "auto", "pins": [pin("clk", "input", None)] },
            "south": { "spacing": "auto", "pins": [pin("q", "output", None)] },
            "west": { "spacing": "manual", "pins": [pin("en", "inout", Some(10.0))] },
        }
    });
    spec["margins"] = json!({ "horizontal": 6.0, "vertical": 6.0 });
    spec
}

fn demo_layout() -> FabricLayout {
    full_pipeline(&technology(), &standard_tiles(), &demo_spec()).expect_layout()
}

#[test]
fn def_components_match_instances() {
    let layout = demo_layout();
    let def = render_all(&layout).def;
    let header = format!("COMPONENTS {} ;", layout.instance_count());
    assert!(def.contains(&header));

    let components: Vec<&str> = def
        .lines()
        .skip_while(|l| !l.starts_with("COMPONENTS"))
        .skip(1)
        .take_while(|l| *l != "END COMPONENTS")
        .collect();
    assert_eq!(components.len(), layout.instance_count());

    let dbu = layout.dbu_per_micron;
    for (line, inst) in components.iter().zip(layout.instances()) {
        let expected = format!(
            "  - {} {} + PLACED ( {} {} ) N ;",
            inst.name,
            inst.cell_type,
            to_dbu(inst.x, dbu),
            to_dbu(inst.y, dbu)
        );
        assert_eq!(*line, expected);
    }
}

#[test]
fn def_rows_cover_every_placement_row() {
    let layout = demo_layout();
    let def = render_all(&layout).def;
    let rows: Vec<&str> = def.lines().filter(|l| l.starts_with("ROW ")).collect();
    let d = &layout.dimensions;
    assert_eq!(
        rows.len() as u64,
        d.fabric_rows + u64::from(d.edge_top) + u64::from(d.edge_bottom)
    );
    assert!(rows[0].starts_with("ROW ROW_BOTTOM_0 unithd 6000 6000 N DO 6 BY 1 STEP 460 0"));
    assert!(rows[1].starts_with("ROW ROW_0 unithd 6000 8720 "));
    assert!(rows.last().unwrap().starts_with("ROW ROW_TOP_1 unithd 6000 "));
}

#[test]
fn def_pins_in_ring_order() {
    let layout = demo_layout();
    let def = render_all(&layout).def;
    assert!(def.contains("PINS 3 ;\n"));
    let order: Vec<usize> = ["- clk ", "- q ", "- en "]
        .iter()
        .map(|p| def.find(p).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(def.contains("  - en + NET en + DIRECTION INOUT + USE SIGNAL\n"));
    assert!(def.contains("  - q + NET q + DIRECTION OUTPUT + USE SIGNAL\n"));
}

#[test]
fn lef_macro_matches_die() {
    let layout = demo_layout();
    let lef = render_all(&layout).lef;
    let d = &layout.dimensions;
    assert!(lef.contains(&format!(
        "  SIZE {:.3} BY {:.3} ;",
        d.die_width, d.die_height
    )));
    assert_eq!(lef.matches("  PIN ").count(), 3);
    assert_eq!(lef.matches("      LAYER met5 ;").count(), 3);
    assert!(lef.ends_with("END demo\n\nEND LIBRARY\n"));
}

#[test]
fn json_report_agrees_with_layout() {
    let layout = demo_layout();
    let report: Value = serde_json::from_str(&render_all(&layout).json).unwrap();
    let stats = &report["statistics"];
    assert_eq!(stats["total_fabric_cells"], layout.stats.total_fabric_cells);
    assert_eq!(stats["total_edge_cells"], layout.stats.total_edge_cells);
    assert_eq!(
        stats["combined_cell_counts"]["DECAP"],
        1 + layout.stats.edge_cells["DECAP4_top"]
    );
    assert_eq!(report["tile_array"], json!(layout.grid.to_rows()));
    assert_eq!(report["tile_array"][1][2], "fill");
    assert_eq!(report["io_pins"].as_array().unwrap().len(), 3);
    assert_eq!(report["io_pins"][2]["edge"], "west");
    assert_eq!(report["io_pins"][2]["direction"], "inout");
    assert_eq!(report["fingerprint"], layout.fingerprint().to_string());
}

#[test]
fn rendering_is_deterministic_across_engines() {
    let sequential = render_all(&demo_layout());
    let parallel = render_all(
        &full_pipeline_with(
            &technology(),
            &standard_tiles(),
            &demo_spec(),
            LoadOptions::default(),
            GenerateOptions { parallel: true },
        )
        .expect_layout(),
    );
    assert_eq!(sequential.def, parallel.def);
    assert_eq!(sequential.lef, parallel.lef);
    assert_eq!(sequential.json, parallel.json);
}

#[test]
fn files_on_disk_match_rendered_text() {
    let layout = demo_layout();
    let rendered = render_all(&layout);
    let dir = tempfile::tempdir().unwrap();
    let written = write_outputs(
        &layout,
        dir.path(),
        "demo",
        &OutputFormat::ALL,
        &WriterOptions::default(),
    )
    .unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), rendered.def);
    assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), rendered.lef);
    assert_eq!(std::fs::read_to_string(&written[2]).unwrap(), rendered.json);
}
