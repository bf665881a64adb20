//! Shaded fraction for one sun position.
//!
//! Decision order (first match wins):
//! 1. sun below the astronomical horizon → NaN
//! 2. sun above `max_shading_elevation` → 0
//! 3. sun at or below the terrain horizon → 1
//! 4. project candidate silhouettes and subtract them from the active area.

use geo::{Area, BooleanOps, MultiPolygon, Polygon, Translate};
use serde::{Deserialize, Serialize};

use super::horizon::horizon_elevation;
use crate::geom2::{CollectorGeometry, GeomCfg};
use crate::layout::{Neighbor, NeighborSet, Slope};

/// Sun position in degrees: elevation above horizontal, azimuth clockwise
/// from north.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    pub elevation: f64,
    pub azimuth: f64,
}

impl SunPosition {
    #[inline]
    pub fn new(elevation: f64, azimuth: f64) -> Self {
        Self {
            elevation,
            azimuth,
        }
    }
}

/// Geometric by-products of one evaluation.
///
/// `shading_geometries` holds every silhouette that passed the distance
/// prune, whether or not it ended up overlapping the active area.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShadingGeometries {
    pub unshaded_geometry: MultiPolygon<f64>,
    pub shading_geometries: Vec<Polygon<f64>>,
}

impl Default for ShadingGeometries {
    /// Nothing left unshaded, no silhouettes.
    fn default() -> Self {
        Self {
            unshaded_geometry: MultiPolygon::new(vec![]),
            shading_geometries: Vec::new(),
        }
    }
}

/// Read-only inputs shared by all evaluations of one field.
#[derive(Clone, Copy, Debug)]
pub struct ShadingScene<'a> {
    pub total: &'a Polygon<f64>,
    pub active: &'a MultiPolygon<f64>,
    pub active_area: f64,
    pub min_tracker_spacing: f64,
    pub neighbors: &'a [Neighbor],
    pub slope: Slope,
    pub max_shading_elevation: f64,
    pub cfg: GeomCfg,
}

impl<'a> ShadingScene<'a> {
    /// Flat ground, no elevation shortcut, default tolerances.
    pub fn new(collector: &'a CollectorGeometry, neighbors: &'a NeighborSet) -> Self {
        Self {
            total: collector.total(),
            active: collector.active(),
            active_area: collector.active_area(),
            min_tracker_spacing: collector.min_tracker_spacing(),
            neighbors: neighbors.as_slice(),
            slope: Slope::FLAT,
            max_shading_elevation: 90.0,
            cfg: GeomCfg::default(),
        }
    }

    pub fn with_slope(mut self, slope: Slope) -> Self {
        self.slope = slope;
        self
    }

    pub fn with_max_shading_elevation(mut self, max_shading_elevation: f64) -> Self {
        self.max_shading_elevation = max_shading_elevation;
        self
    }

    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shortcut {
    SunBelowHorizon,
    AboveMaxShadingElevation,
    SunBelowTerrain,
}

impl Shortcut {
    fn fraction(self) -> f64 {
        match self {
            Shortcut::SunBelowHorizon => f64::NAN,
            Shortcut::AboveMaxShadingElevation => 0.0,
            Shortcut::SunBelowTerrain => 1.0,
        }
    }

    fn geometries(self, scene: &ShadingScene<'_>) -> ShadingGeometries {
        match self {
            Shortcut::AboveMaxShadingElevation => ShadingGeometries {
                unshaded_geometry: scene.active.clone(),
                shading_geometries: Vec::new(),
            },
            Shortcut::SunBelowHorizon | Shortcut::SunBelowTerrain => ShadingGeometries::default(),
        }
    }
}

fn shortcut(sun: SunPosition, scene: &ShadingScene<'_>) -> Option<Shortcut> {
    let verdict = if sun.elevation.is_nan() || sun.elevation < 0.0 {
        Some(Shortcut::SunBelowHorizon)
    } else if sun.elevation > scene.max_shading_elevation {
        Some(Shortcut::AboveMaxShadingElevation)
    } else if sun.elevation <= horizon_elevation(sun.azimuth, scene.slope) {
        Some(Shortcut::SunBelowTerrain)
    } else {
        None
    };
    if let Some(v) = verdict {
        tracing::trace!(
            shortcut = ?v,
            elevation = sun.elevation,
            azimuth = sun.azimuth,
            "shading shortcut"
        );
    }
    verdict
}

/// Offset of `n`'s silhouette in the reference collector plane, or `None`
/// when the neighbor lies in the half plane facing away from the sun.
///
/// Accounts for the terrain slope between neighbor and reference; on flat
/// ground `yoff = −d·cos(Δ)·sin(elevation)`.
#[inline]
pub fn project_neighbor(n: &Neighbor, sun: SunPosition) -> Option<(f64, f64)> {
    let (sin_d, cos_d) = (sun.azimuth - n.relative_azimuth).to_radians().sin_cos();
    if cos_d <= 0.0 {
        return None;
    }
    let slope = n.relative_slope.to_radians();
    let xoff = n.distance * sin_d;
    let yoff = -n.distance * cos_d * (sun.elevation.to_radians() - slope).sin() / slope.cos();
    Some((xoff, yoff))
}

/// Silhouettes that can touch the reference collector: sun-facing
/// neighbors whose projected offset is shorter than `L_min`.
fn candidate_silhouettes<'a>(
    sun: SunPosition,
    scene: &ShadingScene<'a>,
) -> impl Iterator<Item = Polygon<f64>> + 'a {
    let total = scene.total;
    let min_tracker_spacing = scene.min_tracker_spacing;
    let neighbors: &'a [Neighbor] = scene.neighbors;
    neighbors
        .iter()
        .filter_map(move |n| project_neighbor(n, sun))
        .filter(move |(xoff, yoff)| xoff.hypot(*yoff) < min_tracker_spacing)
        .map(move |(xoff, yoff)| total.translate(xoff, yoff))
}

fn subtract(unshaded: MultiPolygon<f64>, silhouette: &Polygon<f64>) -> MultiPolygon<f64> {
    if unshaded.0.is_empty() {
        return unshaded;
    }
    unshaded.difference(&MultiPolygon::new(vec![silhouette.clone()]))
}

fn fraction_from_residual(unshaded: &MultiPolygon<f64>, scene: &ShadingScene<'_>) -> f64 {
    let residual = unshaded.unsigned_area();
    if residual <= scene.cfg.eps_area * scene.active_area {
        return 1.0;
    }
    (1.0 - residual / scene.active_area).clamp(0.0, 1.0)
}

/// Fraction of the active area shaded by neighbors at `sun`.
///
/// NaN when the sun is below the horizon; exactly 0 when no silhouette
/// survives the prune; exactly 1 when nothing of the active area is left.
pub fn shaded_fraction(sun: SunPosition, scene: &ShadingScene<'_>) -> f64 {
    if let Some(s) = shortcut(sun, scene) {
        return s.fraction();
    }
    let (unshaded, candidates) = candidate_silhouettes(sun, scene).fold(
        (scene.active.clone(), 0usize),
        |(unshaded, count), silhouette| (subtract(unshaded, &silhouette), count + 1),
    );
    tracing::trace!(
        candidates,
        elevation = sun.elevation,
        azimuth = sun.azimuth,
        "shading candidates"
    );
    if candidates == 0 {
        return 0.0;
    }
    fraction_from_residual(&unshaded, scene)
}

/// Like [`shaded_fraction`], also returning the residual unshaded geometry
/// and the candidate silhouettes.
pub fn shaded_fraction_with_geometries(
    sun: SunPosition,
    scene: &ShadingScene<'_>,
) -> (f64, ShadingGeometries) {
    if let Some(s) = shortcut(sun, scene) {
        return (s.fraction(), s.geometries(scene));
    }
    let shading_geometries: Vec<Polygon<f64>> = candidate_silhouettes(sun, scene).collect();
    let unshaded_geometry = shading_geometries
        .iter()
        .fold(scene.active.clone(), subtract);
    let fraction = if shading_geometries.is_empty() {
        0.0
    } else {
        fraction_from_residual(&unshaded_geometry, scene)
    };
    (
        fraction,
        ShadingGeometries {
            unshaded_geometry,
            shading_geometries,
        },
    )
}
