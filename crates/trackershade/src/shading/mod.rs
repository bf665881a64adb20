//! Shading engine.
//!
//! Purpose
//! - Evaluate the shaded fraction of the reference collector's active area
//!   for one sun position, given the neighbor set of a field.
//! - Keep the expensive primitive (polygon difference) behind two cheap
//!   filters: the sun-facing half plane and the `L_min` distance prune.
//!
//! Evaluations are pure and independent; callers may batch or parallelize
//! them freely over a shared `ShadingScene`.
//!
//! Code cross-refs: `layout::NeighborSet`, `geom2::CollectorGeometry`

mod engine;
mod horizon;

pub use engine::{
    project_neighbor, shaded_fraction, shaded_fraction_with_geometries, ShadingGeometries,
    ShadingScene, SunPosition,
};
pub use horizon::horizon_elevation;
