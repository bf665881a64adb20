//! Tracker field: collector geometry + field layout, validated once.
//!
//! `TrackerField` owns everything the shading engine reads (geometry, neighbor
//! set, `max_shading_elevation`) and hands out `ShadingScene`s that borrow it.
//! Construction either fully succeeds or returns a `FieldError`; there is no
//! partially initialized field.
//!
//! `FieldConfig` is the serde surface used by the CLI (JSON documents).

use geo::{LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::geom2::{CollectorGeometry, GeomCfg};
use crate::layout::{
    generate_field_layout, max_shading_elevation, LayoutCfg, LayoutParams, LayoutPreset,
    NeighborSet, Slope,
};
use crate::shading::{
    shaded_fraction, shaded_fraction_with_geometries, ShadingGeometries, ShadingScene,
    SunPosition,
};

#[derive(Clone, Debug)]
pub struct TrackerField {
    collector: CollectorGeometry,
    neighbor_order: u32,
    gcr: f64,
    preset: Option<LayoutPreset>,
    params: LayoutParams,
    slope: Slope,
    neighbors: NeighborSet,
    max_shading_elevation: f64,
    cfg: GeomCfg,
}

impl TrackerField {
    /// Field with an explicit lattice shape.
    pub fn new(
        collector: CollectorGeometry,
        neighbor_order: u32,
        gcr: f64,
        params: LayoutParams,
        slope: Slope,
    ) -> Result<Self, FieldError> {
        Self::build(collector, neighbor_order, gcr, None, params, slope)
    }

    /// Field with a named lattice shape.
    pub fn with_preset(
        collector: CollectorGeometry,
        neighbor_order: u32,
        gcr: f64,
        preset: LayoutPreset,
        slope: Slope,
    ) -> Result<Self, FieldError> {
        Self::build(
            collector,
            neighbor_order,
            gcr,
            Some(preset),
            preset.params(),
            slope,
        )
    }

    /// Field described by a configuration document.
    pub fn from_config(config: &FieldConfig) -> Result<Self, FieldError> {
        let (preset, params) = config.layout.resolve()?;
        let collector = config.collector()?;
        Self::build(
            collector,
            config.neighbor_order,
            config.gcr,
            preset,
            params,
            config.slope,
        )
    }

    fn build(
        collector: CollectorGeometry,
        neighbor_order: u32,
        gcr: f64,
        preset: Option<LayoutPreset>,
        params: LayoutParams,
        slope: Slope,
    ) -> Result<Self, FieldError> {
        let layout = LayoutCfg {
            gcr,
            total_area: collector.total_area(),
            min_tracker_spacing: collector.min_tracker_spacing(),
            neighbor_order,
            params,
            slope,
        };
        let neighbors = generate_field_layout(&layout)?;
        let max_shading_elevation = max_shading_elevation(collector.total(), neighbors.as_slice());
        tracing::debug!(
            neighbors = neighbors.len(),
            gcr,
            min_tracker_spacing = collector.min_tracker_spacing(),
            max_shading_elevation,
            preset = preset.map(LayoutPreset::name),
            "tracker field constructed"
        );
        Ok(Self {
            collector,
            neighbor_order,
            gcr,
            preset,
            params,
            slope,
            neighbors,
            max_shading_elevation,
            cfg: GeomCfg::default(),
        })
    }

    /// Replace the numeric tolerances used during evaluation.
    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn collector(&self) -> &CollectorGeometry {
        &self.collector
    }

    pub fn neighbors(&self) -> &NeighborSet {
        &self.neighbors
    }

    pub fn neighbor_order(&self) -> u32 {
        self.neighbor_order
    }

    pub fn gcr(&self) -> f64 {
        self.gcr
    }

    pub fn preset(&self) -> Option<LayoutPreset> {
        self.preset
    }

    pub fn layout_params(&self) -> LayoutParams {
        self.params
    }

    pub fn slope(&self) -> Slope {
        self.slope
    }

    pub fn min_tracker_spacing(&self) -> f64 {
        self.collector.min_tracker_spacing()
    }

    pub fn max_shading_elevation(&self) -> f64 {
        self.max_shading_elevation
    }

    /// Borrowed view used by the shading engine.
    pub fn scene(&self) -> ShadingScene<'_> {
        ShadingScene::new(&self.collector, &self.neighbors)
            .with_slope(self.slope)
            .with_max_shading_elevation(self.max_shading_elevation)
            .with_cfg(self.cfg)
    }

    pub fn shaded_fraction(&self, sun: SunPosition) -> f64 {
        shaded_fraction(sun, &self.scene())
    }

    pub fn shaded_fraction_with_geometries(&self, sun: SunPosition) -> (f64, ShadingGeometries) {
        shaded_fraction_with_geometries(sun, &self.scene())
    }

    /// One fraction per sun position, in input order.
    pub fn shaded_fractions<I>(&self, suns: I) -> Vec<f64>
    where
        I: IntoIterator<Item = SunPosition>,
    {
        let scene = self.scene();
        suns.into_iter()
            .map(|sun| shaded_fraction(sun, &scene))
            .collect()
    }
}

/// Lattice selection as written in a configuration document: either a preset
/// name, or all three explicit parameters. A preset wins when both are given.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSpec {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub offset: Option<f64>,
    #[serde(default)]
    pub rotation: Option<f64>,
}

impl LayoutSpec {
    pub fn preset(preset: LayoutPreset) -> Self {
        Self {
            preset: Some(preset.name().to_string()),
            ..Self::default()
        }
    }

    pub fn custom(params: LayoutParams) -> Self {
        Self {
            preset: None,
            aspect_ratio: Some(params.aspect_ratio),
            offset: Some(params.offset),
            rotation: Some(params.rotation),
        }
    }

    pub fn resolve(&self) -> Result<(Option<LayoutPreset>, LayoutParams), FieldError> {
        if let Some(name) = &self.preset {
            let preset: LayoutPreset = name.parse()?;
            return Ok((Some(preset), preset.params()));
        }
        let aspect_ratio = self
            .aspect_ratio
            .ok_or(FieldError::IncompleteLayout {
                missing: "aspect_ratio",
            })?;
        let offset = self
            .offset
            .ok_or(FieldError::IncompleteLayout { missing: "offset" })?;
        let rotation = self
            .rotation
            .ok_or(FieldError::IncompleteLayout {
                missing: "rotation",
            })?;
        Ok((
            None,
            LayoutParams {
                aspect_ratio,
                offset,
                rotation,
            },
        ))
    }
}

/// JSON-friendly field description.
///
/// Rings are lists of `[x, y]` pairs; closing the ring is optional. When
/// `active_geometry` is omitted the whole outline is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub total_geometry: Vec<[f64; 2]>,
    #[serde(default)]
    pub active_geometry: Option<Vec<Vec<[f64; 2]>>>,
    pub neighbor_order: u32,
    pub gcr: f64,
    pub layout: LayoutSpec,
    #[serde(default)]
    pub slope: Slope,
}

fn ring_polygon(ring: &[[f64; 2]]) -> Polygon<f64> {
    let coords: Vec<(f64, f64)> = ring.iter().map(|&[x, y]| (x, y)).collect();
    Polygon::new(LineString::from(coords), vec![])
}

impl FieldConfig {
    pub fn collector(&self) -> Result<CollectorGeometry, FieldError> {
        let total = ring_polygon(&self.total_geometry);
        match &self.active_geometry {
            None => CollectorGeometry::from_total(total),
            Some(parts) => {
                let active = MultiPolygon::new(parts.iter().map(|r| ring_polygon(r)).collect());
                CollectorGeometry::new(total, active)
            }
        }
    }
}
