use crate::layout::Slope;

/// Elevation (degrees) of the terrain horizon seen from the reference
/// collector towards `azimuth`.
///
/// Never below zero: a downhill ground line does not lower the true horizon.
#[inline]
pub fn horizon_elevation(azimuth: f64, slope: Slope) -> f64 {
    slope.elevation_towards(azimuth).max(0.0)
}
