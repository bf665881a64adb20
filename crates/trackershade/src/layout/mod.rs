//! Regular field layouts.
//!
//! Purpose
//! - Turn `{gcr, aspect_ratio, offset, rotation, slope}` into the positions,
//!   distances, bearings and relative slopes of all neighbors up to a lattice
//!   order, after checking that the layout is physically feasible.
//! - Bound the solar elevation above which no neighbor can shade
//!   (`max_shading_elevation`), which the shading engine uses as a fast path.
//!
//! Conventions
//! - Angles in degrees. Bearings clockwise from north; rotation counterclockwise.
//! - Reference: Cumpston & Pye, "Shading and land use in regularly-spaced
//!   sun-tracking collectors", Solar Energy 2014.
//!
//! Code cross-refs: `LayoutCfg`, `NeighborSet`, `geom2::Affine2`

mod elevation;
mod generate;
mod params;

pub use elevation::max_shading_elevation;
pub use generate::{compass_bearing, generate_field_layout, neighbor_count, Neighbor, NeighborSet};
pub use params::{gcr_max, LayoutCfg, LayoutParams, LayoutPreset, Slope};

#[cfg(test)]
mod tests;
