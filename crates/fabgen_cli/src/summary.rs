//! Human-readable run summary printed after a successful generation.

use std::fmt::Write;
use std::path::Path;

use fabgen_engine::FabricLayout;
use fabgen_tech::Technology;

/// Formats leakage power with a unit chosen by magnitude.
pub fn format_leakage(watts: f64) -> String {
    if watts <= 0.0 {
        "Not available (no power data in technology file)".to_string()
    } else if watts < 1e-3 {
        format!("{:.2} μW", watts * 1e6)
    } else if watts < 1.0 {
        format!("{:.2} mW", watts * 1e3)
    } else {
        format!("{watts:.3} W")
    }
}

/// Renders the summary block.
pub fn format_summary(
    layout: &FabricLayout,
    tech: &Technology,
    output_dir: &Path,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, layout, tech, output_dir)?;
    Ok(out)
}

fn write_summary(
    out: &mut String,
    layout: &FabricLayout,
    tech: &Technology,
    output_dir: &Path,
) -> std::fmt::Result {
    let d = &layout.dimensions;
    let stats = &layout.stats;

    writeln!(out)?;
    writeln!(out, "Fabric Generation Summary:")?;
    writeln!(out, "Fabric: {}", layout.name)?;
    writeln!(
        out,
        "Dimensions: {}x{} tiles",
        d.tile_array_rows, d.tile_array_cols
    )?;
    writeln!(out, "Core Area: {:.2}x{:.2} μm", d.core_width, d.core_height)?;
    writeln!(out, "Die Area: {:.2}x{:.2} μm", d.die_width, d.die_height)?;
    writeln!(out, "Total Cells: {}", stats.total_fabric_cells)?;
    writeln!(out, "Edge Cells: {}", stats.total_edge_cells)?;
    writeln!(out, "I/O Pins: {}", layout.pins.len())?;
    writeln!(
        out,
        "Total Leakage Power: {}",
        format_leakage(stats.total_leakage_watts)
    )?;

    let ranked = stats.ranked_combined();
    if ranked.is_empty() {
        writeln!(out, "Cell Counts by Type: Not available")?;
    } else {
        writeln!(out, "Cell Counts by Type:")?;
        for (alias, count) in ranked {
            writeln!(out, "  {alias}: {count}")?;
        }
    }

    let breakdown = tech.category_breakdown();
    if !breakdown.is_empty() {
        let parts: Vec<String> = breakdown
            .iter()
            .map(|(category, count)| format!("{category}: {count}"))
            .collect();
        writeln!(out, "Technology cell types: {}", parts.join(", "))?;
    }

    writeln!(out, "Output Directory: {}", output_dir.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::fixture;
    use fabgen_diagnostics::DiagnosticSink;
    use fabgen_engine::{generate_fabric, GenerateOptions};
    use fabgen_spec::{load_fabric_spec, load_tile_library, validate, LoadOptions};
    use fabgen_tech::load_technology;

    #[test]
    fn leakage_units() {
        assert_eq!(
            format_leakage(0.0),
            "Not available (no power data in technology file)"
        );
        assert_eq!(format_leakage(12e-6), "12.00 μW");
        assert_eq!(format_leakage(2.5e-3), "2.50 mW");
        assert_eq!(format_leakage(1.25), "1.250 W");
    }

    #[test]
    fn fixture_summary() {
        let sink = DiagnosticSink::new();
        let tech = load_technology(&fixture("tech.json"), &sink).unwrap();
        let tiles = load_tile_library(&fixture("tiles.json"), &sink).unwrap();
        let spec =
            load_fabric_spec(&fixture("fabric.json"), LoadOptions::default(), &sink).unwrap();
        let validated = validate(&tech, &tiles, &spec, &sink).unwrap();
        let layout = generate_fabric(validated, &GenerateOptions::default(), &sink).unwrap();

        let text = format_summary(&layout, &tech, Path::new("out")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Fabric Generation Summary:");
        assert_eq!(lines[2], "Fabric: demo_fabric");
        assert_eq!(lines[3], "Dimensions: 3x4 tiles");
        assert_eq!(lines[4], "Core Area: 46.92x19.04 μm");
        assert_eq!(lines[5], "Die Area: 66.92x39.04 μm");
        assert_eq!(lines[6], "Total Cells: 144");
        assert_eq!(lines[7], "Edge Cells: 38");
        assert_eq!(lines[8], "I/O Pins: 3");
        assert!(lines[9].starts_with("Total Leakage Power: "));
        assert_eq!(lines[10], "Cell Counts by Type:");
        assert_eq!(lines[11], "  DECAP: 98");
        assert!(text.contains("Technology cell types: combinational: 2, sequential: 1, physical: 3\n"));
        assert!(text.ends_with("Output Directory: out\n"));
    }
}
