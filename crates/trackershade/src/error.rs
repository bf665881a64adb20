//! Configuration errors raised while building a tracker field.
//!
//! Evaluation itself never fails; every variant here is a validation failure
//! at layout-generation or field-construction time.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("offset outside valid range [-0.5, 0.5): {offset}")]
    OffsetOutOfRange { offset: f64 },

    #[error("rotation outside valid range [0, 180): {rotation}")]
    RotationOutOfRange { rotation: f64 },

    #[error("L_min not physically possible: {min_tracker_spacing} < {lower_bound} (diameter of a circle of equal area)")]
    MinSpacingImpossible {
        min_tracker_spacing: f64,
        lower_bound: f64,
    },

    #[error("maximum ground cover ratio exceeded or gcr not positive: gcr={gcr}, gcr_max={gcr_max}")]
    GcrOutOfRange { gcr: f64, gcr_max: f64 },

    #[error("aspect ratio too low and not feasible: {aspect_ratio} < {min}")]
    AspectRatioTooLow { aspect_ratio: f64, min: f64 },

    #[error("aspect ratio too high and not feasible: {aspect_ratio} > {max}")]
    AspectRatioTooHigh { aspect_ratio: f64, max: f64 },

    #[error("neighbor order must be at least 1")]
    InvalidNeighborOrder,

    #[error("layout preset must be one of square, diagonal, hexagonal_n_s, hexagonal_e_w; got {name:?}")]
    UnknownLayoutPreset { name: String },

    #[error("{missing} needs to be specified when no layout preset is selected")]
    IncompleteLayout { missing: &'static str },

    #[error("total collector geometry does not completely enclose the active collector geometry")]
    ActiveNotEnclosed,

    #[error("degenerate collector geometry: {reason}")]
    DegenerateGeometry { reason: String },
}
