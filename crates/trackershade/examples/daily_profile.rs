//! Shaded fraction over an idealized day for each layout preset.
//!
//! Purpose
//! - Give a quick, code-backed picture of how the presets compare at one GCR.
//! - Time the batch evaluation on a realistic neighbor order.
//!
//! The sun path is a symmetric arc (sunrise at azimuth 60, noon at 180 with
//! 55 degrees elevation, sunset at 300); good enough for relative comparisons.

use std::time::Instant;

use trackershade::prelude::*;

fn sun_path(steps: usize) -> Vec<SunPosition> {
    (0..=steps)
        .map(|k| {
            let t = k as f64 / steps as f64;
            let azimuth = 60.0 + 240.0 * t;
            let elevation = 55.0 * (std::f64::consts::PI * t).sin();
            SunPosition::new(elevation, azimuth)
        })
        .collect()
}

fn main() {
    let path = sun_path(96);
    for preset in LayoutPreset::ALL {
        let collector = CollectorGeometry::from_total(rectangle(-2.0, -1.0, 2.0, 1.0))
            .expect("valid collector");
        let field = TrackerField::with_preset(collector, 3, 0.3, preset, Slope::default())
            .expect("feasible field");

        let start = Instant::now();
        let fractions = field.shaded_fractions(path.iter().copied());
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

        let valid: Vec<f64> = fractions.iter().copied().filter(|f| !f.is_nan()).collect();
        let mean = valid.iter().sum::<f64>() / valid.len().max(1) as f64;
        println!(
            "preset={preset} max_shading_elevation={:.3} mean_shaded={mean:.4} time_ms={elapsed_ms:.3}",
            field.max_shading_elevation()
        );
    }
}
