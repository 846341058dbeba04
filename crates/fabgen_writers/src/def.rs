//! DEF 5.8 writer.
//!
//! Emits the die area, one `ROW` per placement row (bottom edge rows, fabric
//! rows, top edge rows), every cell instance as a `PLACED` component and the
//! I/O pins. All coordinates are database units.
//!
//! ```text
//! VERSION 5.8 ;
//! DESIGN demo ;
//! UNITS DISTANCE MICRONS 1000 ;
//! DIEAREA ( 0 0 ) ( 14500 14000 ) ;
//!
//! ROW ROW_0 unithd 5000 5000 N DO 8 BY 1 STEP 500 0 ;
//! ...
//! ```

use crate::error::WriterError;
use crate::WriterOptions;
use fabgen_common::to_dbu;
use fabgen_engine::FabricLayout;
use std::fmt::Write;

/// Renders `layout` as a DEF document.
pub fn write_def(layout: &FabricLayout, options: &WriterOptions) -> Result<String, WriterError> {
    let mut out = String::new();
    header(&mut out, layout)?;
    rows(&mut out, layout)?;
    components(&mut out, layout)?;
    pins(&mut out, layout, options)?;
    writeln!(out, "END DESIGN")?;
    Ok(out)
}

fn header(out: &mut String, layout: &FabricLayout) -> Result<(), WriterError> {
    let dbu = layout.dbu_per_micron;
    let d = &layout.dimensions;
    writeln!(out, "VERSION 5.8 ;")?;
    writeln!(out, "DIVIDERCHAR \"/\" ;")?;
    writeln!(out, "BUSBITCHARS \"[]\" ;")?;
    writeln!(out, "DESIGN {} ;", layout.name)?;
    writeln!(out, "UNITS DISTANCE MICRONS {dbu} ;")?;
    writeln!(
        out,
        "DIEAREA ( 0 0 ) ( {} {} ) ;",
        to_dbu(d.die_width, dbu),
        to_dbu(d.die_height, dbu)
    )?;
    writeln!(out)?;
    Ok(())
}

fn rows(out: &mut String, layout: &FabricLayout) -> Result<(), WriterError> {
    let dbu = layout.dbu_per_micron;
    let d = &layout.dimensions;
    let x = to_dbu(d.margin_horizontal, dbu);
    let step = to_dbu(d.site_width, dbu);
    let row = |out: &mut String, label: String, row_index: u64| -> Result<(), WriterError> {
        let y = to_dbu(d.margin_vertical + row_index as f64 * d.site_height, dbu);
        writeln!(
            out,
            "ROW {label} {} {x} {y} N DO {} BY 1 STEP {step} 0 ;",
            layout.site_name, d.fabric_sites
        )?;
        Ok(())
    };

    let bottom = u64::from(d.edge_bottom);
    for i in 0..bottom {
        row(out, format!("ROW_BOTTOM_{i}"), i)?;
    }
    for i in 0..d.fabric_rows {
        row(out, format!("ROW_{i}"), bottom + i)?;
    }
    for i in 0..u64::from(d.edge_top) {
        row(out, format!("ROW_TOP_{}", bottom + i), bottom + d.fabric_rows + i)?;
    }
    writeln!(out)?;
    Ok(())
}

fn components(out: &mut String, layout: &FabricLayout) -> Result<(), WriterError> {
    let dbu = layout.dbu_per_micron;
    writeln!(out, "COMPONENTS {} ;", layout.instance_count())?;
    for inst in layout.instances() {
        writeln!(
            out,
            "  - {} {} + PLACED ( {} {} ) N ;",
            inst.name,
            inst.cell_type,
            to_dbu(inst.x, dbu),
            to_dbu(inst.y, dbu)
        )?;
    }
    writeln!(out, "END COMPONENTS")?;
    writeln!(out)?;
    Ok(())
}

fn pins(out: &mut String, layout: &FabricLayout, options: &WriterOptions) -> Result<(), WriterError> {
    if layout.pins.is_empty() {
        return Ok(());
    }
    let dbu = layout.dbu_per_micron;
    writeln!(out, "PINS {} ;", layout.pins.len())?;
    for pin in &layout.pins {
        let x1 = to_dbu(pin.x, dbu);
        let y1 = to_dbu(pin.y, dbu);
        let x2 = to_dbu(pin.x + pin.width, dbu);
        let y2 = to_dbu(pin.y + pin.height, dbu);
        writeln!(
            out,
            "  - {name} + NET {name} + DIRECTION {} + USE SIGNAL",
            pin.direction.keyword(),
            name = pin.name
        )?;
        writeln!(
            out,
            "    + LAYER {} ( {x1} {y1} ) ( {x2} {y2} )",
            options.pin_layer
        )?;
        writeln!(out, "    + PLACED ( {x1} {y1} ) N ;")?;
    }
    writeln!(out, "END PINS")?;
    writeln!(out)?;
    Ok(())
}
