//! Shading of two-axis tracking collectors in regular fields.
//!
//! Pipeline: a `CollectorGeometry` (outline + active parts) and a layout
//! description feed the layout generator, which produces the neighbor set and
//! the elevation bound; the shading engine then turns a sun position into the
//! fraction of the reference collector's active area that lies in shadow.
//!
//! Entry point for most callers is `field::TrackerField`.
//!
//! API Policy
//! - Internal crate, consumed by the `trackershade-cli` binary and benches.
//!   Breaking changes are fine when they improve the design.

pub mod api;
pub mod error;
pub mod field;
pub mod geom2;
pub mod layout;
pub mod shading;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::FieldError;
pub use field::{FieldConfig, LayoutSpec, TrackerField};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::FieldError;
    pub use crate::field::{FieldConfig, LayoutSpec, TrackerField};
    pub use crate::geom2::{multi, rectangle, regular_polygon, CollectorGeometry, GeomCfg};
    pub use crate::layout::{LayoutParams, LayoutPreset, Slope};
    pub use crate::shading::{ShadingGeometries, SunPosition};
}
