//! 2D collector geometry.
//!
//! Purpose
//! - Hold the collector outline and its active parts as `geo` polygons, with
//!   the derived quantities the layout and shading code read repeatedly
//!   (areas, `L_min`, bounding box).
//! - Provide the small affine toolkit (`Affine2`, nalgebra-backed) that maps
//!   integer lattice indices to field coordinates.
//!
//! Conventions
//! - Local planar frame: x = east, y = north, origin on the rotation axis.
//! - Any length unit, as long as geometry, gcr and spacing agree.
//!
//! Code cross-refs: `CollectorGeometry`, `GeomCfg`, `Affine2`

mod collector;
mod types;
mod util;

pub use collector::{min_tracker_spacing, CollectorGeometry};
pub use types::{Affine2, GeomCfg};
pub use util::{farthest_vertex_distance, multi, rectangle, regular_polygon};

#[cfg(test)]
mod tests;
