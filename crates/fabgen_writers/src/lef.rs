//! LEF 5.8 abstract writer.
//!
//! The fabric is exported as a single `CLASS BLOCK` macro the size of the
//! die, with one port rectangle per placed I/O pin. Coordinates are microns
//! with three decimals.

use crate::error::WriterError;
use crate::WriterOptions;
use fabgen_engine::FabricLayout;
use std::fmt::Write;

/// Renders `layout` as a LEF macro library.
pub fn write_lef(layout: &FabricLayout, options: &WriterOptions) -> Result<String, WriterError> {
    let mut out = String::new();
    let name = &layout.name;
    let d = &layout.dimensions;

    writeln!(out, "VERSION 5.8 ;")?;
    writeln!(out, "BUSBITCHARS \"[]\" ;")?;
    writeln!(out, "DIVIDERCHAR \"/\" ;")?;
    writeln!(out)?;
    writeln!(out, "UNITS")?;
    writeln!(out, "  DATABASE MICRONS {} ;", layout.dbu_per_micron)?;
    writeln!(out, "END UNITS")?;
    writeln!(out)?;

    writeln!(out, "MACRO {name}")?;
    writeln!(out, "  CLASS BLOCK ;")?;
    writeln!(out, "  ORIGIN 0 0 ;")?;
    writeln!(out, "  FOREIGN {name} 0 0 ;")?;
    writeln!(out, "  SIZE {:.3} BY {:.3} ;", d.die_width, d.die_height)?;
    for pin in &layout.pins {
        writeln!(out, "  PIN {}", pin.name)?;
        writeln!(out, "    DIRECTION {} ;", pin.direction.keyword())?;
        writeln!(out, "    USE SIGNAL ;")?;
        writeln!(out, "    PORT")?;
        writeln!(out, "      LAYER {} ;", options.pin_layer)?;
        writeln!(
            out,
            "        RECT {:.3} {:.3} {:.3} {:.3} ;",
            pin.x,
            pin.y,
            pin.x + pin.width,
            pin.y + pin.height
        )?;
        writeln!(out, "    END")?;
        writeln!(out, "  END {}", pin.name)?;
    }
    writeln!(out, "END {name}")?;
    writeln!(out)?;
    writeln!(out, "END LIBRARY")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{layout, layout_without_pins};

    #[test]
    fn macro_size_and_units() {
        let lef = write_lef(&layout(), &WriterOptions::default()).unwrap();
        assert!(lef.starts_with("VERSION 5.8 ;\n"));
        assert!(lef.contains("UNITS\n  DATABASE MICRONS 1000 ;\nEND UNITS\n"));
        assert!(lef.contains("MACRO mini\n  CLASS BLOCK ;\n  ORIGIN 0 0 ;\n  FOREIGN mini 0 0 ;\n"));
        assert!(lef.contains("  SIZE 14.500 BY 14.000 ;\n"));
        assert!(lef.ends_with("END mini\n\nEND LIBRARY\n"));
    }

    #[test]
    fn pin_port_rectangle() {
        let lef = write_lef(&layout(), &WriterOptions::default()).unwrap();
        let expected = "  PIN clk\n    DIRECTION INPUT ;\n    USE SIGNAL ;\n    PORT\n      \
                        LAYER met5 ;\n        RECT 6.750 13.000 7.750 14.000 ;\n    END\n  END clk\n";
        assert!(lef.contains(expected), "{lef}");
    }

    #[test]
    fn macro_without_pins() {
        let lef = write_lef(&layout_without_pins(), &WriterOptions::default()).unwrap();
        assert!(!lef.contains("PIN "));
        assert!(lef.contains("  SIZE 14.500 BY 14.000 ;\nEND mini\n"));
    }
}
