//! Conversion from physical microns to integer database units.

/// Default scale for every unit family when a technology omits it.
pub const DEFAULT_UNIT_SCALE: u32 = 1000;

/// Converts a physical coordinate in microns to database units.
///
/// The value is multiplied by `scale` and truncated toward zero. Every
/// integer-coordinate writer goes through this function.
pub fn to_dbu(microns: f64, scale: u32) -> i64 {
    (microns * f64::from(scale)).trunc() as i64
}
