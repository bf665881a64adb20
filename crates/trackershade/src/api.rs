//! Curated internal API (UNSTABLE).
//!
//! One flat surface over the layout generator and the shading engine for
//! callers that want the free functions rather than `TrackerField`.

// Collector geometry
pub use crate::geom2::{
    farthest_vertex_distance, min_tracker_spacing, multi, rectangle, regular_polygon, Affine2,
    CollectorGeometry, GeomCfg,
};
// Field layout
pub use crate::layout::{
    compass_bearing, gcr_max, generate_field_layout, max_shading_elevation, neighbor_count,
    LayoutCfg, LayoutParams, LayoutPreset, Neighbor, NeighborSet, Slope,
};
// Shading engine
pub use crate::shading::{
    horizon_elevation, project_neighbor, shaded_fraction, shaded_fraction_with_geometries,
    ShadingGeometries, ShadingScene, SunPosition,
};
// Configuration
pub use crate::error::FieldError;
pub use crate::field::{FieldConfig, LayoutSpec, TrackerField};
