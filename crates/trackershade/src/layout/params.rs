//! Lattice parameters, presets, ground slope, and their feasibility checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Regular lattice shape before scaling: stretch of the primary axis, row
/// offset as a fraction of the primary spacing, counterclockwise rotation in
/// degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub aspect_ratio: f64,
    pub offset: f64,
    pub rotation: f64,
}

/// Named lattice shapes; each is only a shortcut for a `LayoutParams` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutPreset {
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "diagonal")]
    Diagonal,
    #[serde(rename = "hexagonal_n_s")]
    HexagonalNS,
    #[serde(rename = "hexagonal_e_w")]
    HexagonalEW,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 4] = [
        LayoutPreset::Square,
        LayoutPreset::Diagonal,
        LayoutPreset::HexagonalNS,
        LayoutPreset::HexagonalEW,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutPreset::Square => "square",
            LayoutPreset::Diagonal => "diagonal",
            LayoutPreset::HexagonalNS => "hexagonal_n_s",
            LayoutPreset::HexagonalEW => "hexagonal_e_w",
        }
    }

    pub fn params(self) -> LayoutParams {
        // sqrt(3)/2: rows of a hexagonal lattice
        let hex_ratio = 3f64.sqrt() / 2.0;
        match self {
            LayoutPreset::Square => LayoutParams {
                aspect_ratio: 1.0,
                offset: 0.0,
                rotation: 0.0,
            },
            LayoutPreset::Diagonal => LayoutParams {
                aspect_ratio: 1.0,
                offset: 0.0,
                rotation: 45.0,
            },
            LayoutPreset::HexagonalNS => LayoutParams {
                aspect_ratio: hex_ratio,
                offset: -0.5,
                rotation: 0.0,
            },
            LayoutPreset::HexagonalEW => LayoutParams {
                aspect_ratio: hex_ratio,
                offset: -0.5,
                rotation: 90.0,
            },
        }
    }
}

impl From<LayoutPreset> for LayoutParams {
    fn from(preset: LayoutPreset) -> Self {
        preset.params()
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutPreset {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutPreset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| FieldError::UnknownLayoutPreset { name: s.to_string() })
    }
}

/// Plane ground slope: azimuth of the slope normal projected on the
/// horizontal, and tilt from horizontal, both in degrees. Default is flat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slope {
    pub azimuth: f64,
    pub tilt: f64,
}

impl Slope {
    pub const FLAT: Slope = Slope {
        azimuth: 0.0,
        tilt: 0.0,
    };

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.tilt == 0.0
    }

    /// Elevation angle of the ground line seen from the origin towards
    /// `azimuth` (degrees, positive uphill).
    #[inline]
    pub fn elevation_towards(&self, azimuth: f64) -> f64 {
        (-(self.azimuth - azimuth).to_radians().cos() * self.tilt.to_radians().tan())
            .atan()
            .to_degrees()
    }
}

/// Largest feasible ground cover ratio for a collector of `total_area` with
/// spacing `min_tracker_spacing` and row `offset`.
#[inline]
pub fn gcr_max(total_area: f64, min_tracker_spacing: f64, offset: f64) -> f64 {
    total_area / (min_tracker_spacing.powi(2) * (1.0 - offset.powi(2)).sqrt())
}

/// Full input of the layout generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutCfg {
    pub gcr: f64,
    pub total_area: f64,
    pub min_tracker_spacing: f64,
    pub neighbor_order: u32,
    pub params: LayoutParams,
    pub slope: Slope,
}

impl LayoutCfg {
    /// Feasibility checks, in an order where each check may rely on the
    /// earlier ones having passed. Negated comparisons also reject NaN.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), FieldError> {
        let LayoutParams {
            aspect_ratio,
            offset,
            rotation,
        } = self.params;
        if !(-0.5..0.5).contains(&offset) {
            return Err(FieldError::OffsetOutOfRange { offset });
        }
        if !(0.0..180.0).contains(&rotation) {
            return Err(FieldError::RotationOutOfRange { rotation });
        }
        let lower_bound = (4.0 * self.total_area / std::f64::consts::PI).sqrt();
        if !(self.min_tracker_spacing >= lower_bound) {
            return Err(FieldError::MinSpacingImpossible {
                min_tracker_spacing: self.min_tracker_spacing,
                lower_bound,
            });
        }
        let gcr_max = gcr_max(self.total_area, self.min_tracker_spacing, offset);
        if !(self.gcr > 0.0 && self.gcr <= gcr_max) {
            return Err(FieldError::GcrOutOfRange {
                gcr: self.gcr,
                gcr_max,
            });
        }
        let min = (1.0 - offset.powi(2)).sqrt();
        if !(aspect_ratio >= min) {
            return Err(FieldError::AspectRatioTooLow { aspect_ratio, min });
        }
        let max = self.total_area / (self.gcr * self.min_tracker_spacing.powi(2));
        if !(aspect_ratio <= max) {
            return Err(FieldError::AspectRatioTooHigh { aspect_ratio, max });
        }
        if self.neighbor_order == 0 {
            return Err(FieldError::InvalidNeighborOrder);
        }
        Ok(())
    }
}
