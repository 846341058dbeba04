//! I/O pin placement around the die boundary.

use crate::dimensions::FabricDimensions;
use crate::layout::PlacedPin;
use fabgen_common::FabricError;
use fabgen_spec::{IoPin, IoRing, IoSide, PinSize, Spacing};

/// Places every pin of `ring`, edges in document order.
///
/// Auto-spaced pins are spread evenly inside the margin band along their
/// edge. Manually spaced pins are centered on their declared position and
/// must lie entirely inside the band.
pub fn place_pins(
    ring: Option<&IoRing>,
    dims: &FabricDimensions,
) -> Result<Vec<PlacedPin>, FabricError> {
    let Some(ring) = ring else {
        return Ok(Vec::new());
    };
    let size = ring.pin_size;
    let mut placed = Vec::with_capacity(ring.pin_count());

    for edge in &ring.edges {
        match &edge.spacing {
            Spacing::Auto(pins) => {
                let (margin, extent, pin_extent) = axis(edge.side, dims, &size);
                let spacing = (extent - 2.0 * margin) / (pins.len() + 1) as f64;
                for (i, pin) in pins.iter().enumerate() {
                    let along = margin + (i + 1) as f64 * spacing - pin_extent / 2.0;
                    placed.push(make_pin(pin, edge.side, along, dims, &size));
                }
            }
            Spacing::Manual(pins) => {
                let (margin, extent, pin_extent) = axis(edge.side, dims, &size);
                for manual in pins {
                    let along = manual.position - pin_extent / 2.0;
                    if along < margin || along + pin_extent > extent - margin {
                        return Err(FabricError::PinOutsideMargins {
                            pin: manual.pin.name.clone(),
                            edge: edge.side.to_string(),
                            start: along,
                            end: along + pin_extent,
                            min: margin,
                            max: extent - margin,
                        });
                    }
                    placed.push(make_pin(&manual.pin, edge.side, along, dims, &size));
                }
            }
        }
    }
    Ok(placed)
}

/// Margin, die extent and pin extent along the axis pins spread on.
fn axis(side: IoSide, dims: &FabricDimensions, size: &PinSize) -> (f64, f64, f64) {
    if side.is_horizontal() {
        (dims.margin_horizontal, dims.die_width, size.width())
    } else {
        (dims.margin_vertical, dims.die_height, size.height())
    }
}

fn make_pin(
    pin: &IoPin,
    side: IoSide,
    along: f64,
    dims: &FabricDimensions,
    size: &PinSize,
) -> PlacedPin {
    let (x, y) = match side {
        IoSide::North => (along, dims.die_height - size.height()),
        IoSide::South => (along, 0.0),
        IoSide::East => (dims.die_width - size.width(), along),
        IoSide::West => (0.0, along),
    };
    PlacedPin {
        name: pin.name.clone(),
        direction: pin.direction,
        pin_type: pin.pin_type.clone(),
        side,
        x,
        y,
        width: size.width(),
        height: size.height(),
    }
}
