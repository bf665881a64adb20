//! Collector outline (`total`) and energy-producing subset (`active`).
//!
//! Both live in the collector's local frame: x = east, y = north, origin on
//! the tracker's rotation axis. The total outline casts shadows; only the
//! active parts count towards the shaded fraction.

use geo::{Area, BoundingRect, Contains, MultiPolygon, Polygon, Rect};

use super::util::farthest_vertex_distance;
use crate::error::FieldError;

/// Minimum distance between two collector axes for which the collectors can
/// never touch: twice the farthest outline point from the origin.
pub fn min_tracker_spacing(total: &Polygon<f64>) -> f64 {
    2.0 * farthest_vertex_distance(total)
}

/// Validated, immutable collector geometry with cached derived quantities.
#[derive(Clone, Debug)]
pub struct CollectorGeometry {
    total: Polygon<f64>,
    active: MultiPolygon<f64>,
    total_area: f64,
    active_area: f64,
    min_tracker_spacing: f64,
    bounds: Rect<f64>,
}

impl CollectorGeometry {
    /// Build from a total outline and its active parts.
    ///
    /// Fails when either area is not positive or when an active part sticks
    /// out of the total outline.
    pub fn new(total: Polygon<f64>, active: MultiPolygon<f64>) -> Result<Self, FieldError> {
        let total_area = total.unsigned_area();
        if !(total_area > 0.0 && total_area.is_finite()) {
            return Err(FieldError::DegenerateGeometry {
                reason: "total collector geometry has no area".into(),
            });
        }
        let active_area = active.unsigned_area();
        if !(active_area > 0.0 && active_area.is_finite()) {
            return Err(FieldError::DegenerateGeometry {
                reason: "active collector geometry has no area".into(),
            });
        }
        if !active.0.iter().all(|part| total.contains(part)) {
            return Err(FieldError::ActiveNotEnclosed);
        }
        let bounds = total
            .bounding_rect()
            .ok_or_else(|| FieldError::DegenerateGeometry {
                reason: "total collector geometry has no vertices".into(),
            })?;
        let min_tracker_spacing = min_tracker_spacing(&total);
        Ok(Self {
            total,
            active,
            total_area,
            active_area,
            min_tracker_spacing,
            bounds,
        })
    }

    /// Collector whose whole outline is active.
    pub fn from_total(total: Polygon<f64>) -> Result<Self, FieldError> {
        let active = MultiPolygon::new(vec![total.clone()]);
        Self::new(total, active)
    }

    #[inline]
    pub fn total(&self) -> &Polygon<f64> {
        &self.total
    }

    #[inline]
    pub fn active(&self) -> &MultiPolygon<f64> {
        &self.active
    }

    #[inline]
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    #[inline]
    pub fn active_area(&self) -> f64 {
        self.active_area
    }

    /// `L_min`: see [`min_tracker_spacing`].
    #[inline]
    pub fn min_tracker_spacing(&self) -> f64 {
        self.min_tracker_spacing
    }

    /// Axis-aligned bounding box of the total outline.
    #[inline]
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }
}
