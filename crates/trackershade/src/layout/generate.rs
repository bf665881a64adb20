//! Neighbor positions for a regular field layout.
//!
//! Pipeline per lattice index `(i, j)`: shear + stretch (`Affine2::sheared_lattice`),
//! counterclockwise rotation, GCR scaling, then slope height and bearings.

use nalgebra::Vector2;
use serde::Serialize;

use super::params::{LayoutCfg, Slope};
use crate::error::FieldError;
use crate::geom2::Affine2;

/// One neighboring collector relative to the reference collector at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Neighbor {
    /// East offset.
    pub x: f64,
    /// North offset.
    pub y: f64,
    /// Height offset caused by the ground slope (positive = higher), in the
    /// same length unit as `x` and `y`.
    pub z: f64,
    /// Ground distance to the reference collector.
    pub distance: f64,
    /// Bearing of the neighbor, degrees clockwise from north in [0, 360).
    pub relative_azimuth: f64,
    /// Terrain slope towards the neighbor in degrees; positive when uphill.
    pub relative_slope: f64,
}

/// All neighbors up to a lattice order, in row-major scan order (south row
/// first, west to east). Order carries no meaning beyond reproducibility.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NeighborSet {
    neighbors: Vec<Neighbor>,
}

impl NeighborSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.neighbors
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.neighbors.iter()
    }
}

impl<'a> IntoIterator for &'a NeighborSet {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}

/// Number of neighbors for a lattice order `n`: `(2n+1)² − 1`.
#[inline]
pub fn neighbor_count(neighbor_order: u32) -> usize {
    let side = 2 * neighbor_order as usize + 1;
    side * side - 1
}

/// Integer lattice indices `(i, j)` for `|i|, |j| ≤ n`, `j` outer, origin skipped.
fn lattice_indices(n: i64) -> impl Iterator<Item = (i64, i64)> {
    (-n..=n)
        .flat_map(move |j| (-n..=n).map(move |i| (i, j)))
        .filter(|&(i, j)| (i, j) != (0, 0))
}

/// Compass bearing (clockwise from north, [0, 360)) of the point `(x, y)`.
#[inline]
pub fn compass_bearing(x: f64, y: f64) -> f64 {
    (450.0 - y.atan2(x).to_degrees()).rem_euclid(360.0)
}

/// Generate the neighbor set for a validated field layout.
///
/// The height `z` is derived from the scaled coordinates, so it is expressed
/// in the same length unit as the collector geometry.
pub fn generate_field_layout(cfg: &LayoutCfg) -> Result<NeighborSet, FieldError> {
    cfg.validate()?;
    let p = cfg.params;
    let scaling = (cfg.total_area / (cfg.gcr * p.aspect_ratio)).sqrt();
    let to_field = Affine2::scaling(scaling)
        .compose(&Affine2::rotation_deg(p.rotation))
        .compose(&Affine2::sheared_lattice(p.aspect_ratio, p.offset));

    let neighbors: Vec<Neighbor> = lattice_indices(i64::from(cfg.neighbor_order))
        .map(|(i, j)| {
            let pos = to_field.apply(Vector2::new(i as f64, j as f64));
            neighbor_at(pos.x, pos.y, cfg.slope)
        })
        .collect();

    tracing::trace!(
        count = neighbors.len(),
        scaling,
        rotation = p.rotation,
        "generated field layout"
    );
    Ok(NeighborSet { neighbors })
}

fn neighbor_at(x: f64, y: f64, slope: Slope) -> Neighbor {
    let tan_tilt = slope.tilt.to_radians().tan();
    let (sin_az, cos_az) = slope.azimuth.to_radians().sin_cos();
    let relative_azimuth = compass_bearing(x, y);
    Neighbor {
        x,
        y,
        z: -x * sin_az * tan_tilt - y * cos_az * tan_tilt,
        distance: x.hypot(y),
        relative_azimuth,
        relative_slope: slope.elevation_towards(relative_azimuth),
    }
}
