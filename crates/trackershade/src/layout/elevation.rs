//! Upper bound on the solar elevation at which any shading is possible.
//!
//! Two closed forms per neighbor, then `min(max_rect, max_circ)`:
//! - rectangular: the collector as its bounding box; the critical sun position
//!   has an upper corner of the projected silhouette touching a lower corner of
//!   the reference collector. Exact for rectangles.
//! - circular: the collector as its bounding circle (diameter `L_min`); the
//!   critical position has both circles tangent with the shadow straight below.
//!   Exact for circles.
//!
//! Other outlines get a conservative (never too low) value.

use geo::{BoundingRect, Polygon};

use super::generate::Neighbor;
use crate::geom2::min_tracker_spacing;

/// `asin` in degrees with the argument clamped to 1: an unreachable critical
/// position means shading is possible up to the zenith.
#[inline]
fn asin_deg_clamped(v: f64) -> f64 {
    v.min(1.0).asin().to_degrees()
}

/// Largest solar elevation (degrees) for which `neighbors` can shade a
/// collector with outline `total`.
pub fn max_shading_elevation(total: &Polygon<f64>, neighbors: &[Neighbor]) -> f64 {
    let Some(bounds) = total.bounding_rect() else {
        return 90.0;
    };
    if neighbors.is_empty() {
        return 90.0;
    }
    let (x_dim, y_dim) = (bounds.width(), bounds.height());
    let d_min = min_tracker_spacing(total);

    let (max_rect, max_circ) = neighbors.iter().fold(
        (f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(max_rect, max_circ), n| {
            let cos_slope = n.relative_slope.to_radians().cos();
            let rect_base = if x_dim >= n.distance {
                90.0
            } else {
                let delta_gamma = (x_dim / n.distance).asin();
                asin_deg_clamped(y_dim * cos_slope / (n.distance * delta_gamma.cos()))
            };
            let rect = rect_base + n.relative_slope;
            let circ = asin_deg_clamped(d_min * cos_slope / n.distance) + n.relative_slope;
            (max_rect.max(rect), max_circ.max(circ))
        },
    );
    max_rect.min(max_circ)
}
