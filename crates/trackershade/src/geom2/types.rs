//! Basic 2D types and tolerances shared by layout and shading.
//!
//! - `GeomCfg`: centralizes the epsilons used when turning polygon areas into fractions.
//! - `Affine2`: 2D affine map used to carry integer lattice indices into field coordinates.
//!
//! Code cross-refs: `collector::CollectorGeometry`, `layout::generate_field_layout`

use nalgebra::{Matrix2, Rotation2, Vector2};

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Residual area below `eps_area * active_area` counts as fully shaded.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps_area: 1e-12 }
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn linear(m: Matrix2<f64>) -> Self {
        Self {
            m,
            t: Vector2::zeros(),
        }
    }

    /// Counterclockwise rotation about the origin, angle in degrees.
    #[inline]
    pub fn rotation_deg(angle: f64) -> Self {
        Self::linear(*Rotation2::new(angle.to_radians()).matrix())
    }

    /// Uniform scaling about the origin.
    #[inline]
    pub fn scaling(s: f64) -> Self {
        Self::linear(Matrix2::identity() * s)
    }

    /// Lattice map before rotation: shear rows by `offset`, then stretch the
    /// primary axis by `aspect_ratio`.
    ///
    /// `(i, j) ↦ (aspect_ratio · i, j + offset · i)`; the shear reads the
    /// unstretched `i`.
    #[inline]
    pub fn sheared_lattice(aspect_ratio: f64, offset: f64) -> Self {
        Self::linear(Matrix2::new(aspect_ratio, 0.0, offset, 1.0))
    }

    /// Composition `self ∘ other` (apply `other` first).
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }
}
