use super::*;
use crate::error::FieldError;
use crate::geom2::{min_tracker_spacing, rectangle, regular_polygon};
use geo::{Area, Polygon};
use proptest::prelude::*;

const TOL: f64 = 1e-6;

fn field_rect() -> Polygon<f64> {
    rectangle(-2.0, -1.0, 2.0, 1.0)
}

fn layout_for(total: &Polygon<f64>, gcr: f64, params: LayoutParams, order: u32) -> LayoutCfg {
    LayoutCfg {
        gcr,
        total_area: total.unsigned_area(),
        min_tracker_spacing: min_tracker_spacing(total),
        neighbor_order: order,
        params,
        slope: Slope::FLAT,
    }
}

fn square(gcr: f64) -> LayoutCfg {
    layout_for(&field_rect(), gcr, LayoutPreset::Square.params(), 1)
}

fn custom(aspect_ratio: f64, offset: f64, rotation: f64) -> LayoutParams {
    LayoutParams {
        aspect_ratio,
        offset,
        rotation,
    }
}

fn assert_all_close(actual: impl IntoIterator<Item = f64>, expected: &[f64]) {
    let actual: Vec<f64> = actual.into_iter().collect();
    assert_eq!(actual.len(), expected.len());
    for (k, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < TOL, "index {k}: {a} vs {e}");
    }
}

#[test]
fn square_layout_positions_and_bearings() {
    let set = generate_field_layout(&square(0.125)).expect("feasible");
    assert_eq!(set.len(), 8);
    assert_all_close(
        set.iter().map(|n| n.x),
        &[-8.0, 0.0, 8.0, -8.0, 8.0, -8.0, 0.0, 8.0],
    );
    assert_all_close(
        set.iter().map(|n| n.y),
        &[-8.0, -8.0, -8.0, 0.0, 0.0, 8.0, 8.0, 8.0],
    );
    assert_all_close(
        set.iter().map(|n| n.relative_azimuth),
        &[225.0, 180.0, 135.0, 270.0, 90.0, 315.0, 0.0, 45.0],
    );
    let diag = 128f64.sqrt();
    assert_all_close(
        set.iter().map(|n| n.distance),
        &[diag, 8.0, diag, 8.0, 8.0, diag, 8.0, diag],
    );
    assert!(set.iter().all(|n| n.z == 0.0 && n.relative_slope == 0.0));
}

#[test]
fn spacing_scales_with_gcr() {
    let set = generate_field_layout(&square(0.25)).expect("feasible");
    let s = 32f64.sqrt();
    assert_all_close(set.iter().map(|n| n.x), &[-s, 0.0, s, -s, s, -s, 0.0, s]);
}

#[test]
fn sloped_ground_heights_and_relative_slopes() {
    let mut cfg = square(0.125);
    cfg.slope = Slope {
        azimuth: 45.0,
        tilt: 5.0,
    };
    let set = generate_field_layout(&cfg).expect("feasible");
    let dz = 8.0 * std::f64::consts::FRAC_1_SQRT_2 * 5f64.to_radians().tan();
    assert!((set.as_slice()[0].z - 2.0 * dz).abs() < 1e-12);
    assert!((set.as_slice()[0].z - 0.98982124).abs() < TOL);
    // Unscaled lattice height times the scaling factor sqrt(area / gcr) = 8.
    assert!((set.as_slice()[0].z / 8.0 - 0.12372765).abs() < TOL);
    assert!((set.as_slice()[7].z + 2.0 * dz).abs() < 1e-12);
    assert_all_close(
        set.iter().map(|n| n.relative_slope),
        &[5.0, 3.540025, 0.0, 3.540025, -3.540025, 0.0, -3.540025, -5.0],
    );
}

#[test]
fn neighbor_count_follows_lattice_order() {
    let mut cfg = square(0.125);
    cfg.neighbor_order = 3;
    let set = generate_field_layout(&cfg).expect("feasible");
    assert_eq!(set.len(), 7 * 7 - 1);
    assert_eq!(neighbor_count(3), 48);
}

#[test]
fn infeasible_layouts_are_rejected() {
    let total = field_rect();
    let square = LayoutPreset::Square.params();

    let err = generate_field_layout(&layout_for(&total, 0.5, square, 1)).unwrap_err();
    assert!(matches!(err, FieldError::GcrOutOfRange { .. }));
    assert!(err.to_string().contains("maximum ground cover ratio exceeded"));

    let err = generate_field_layout(&layout_for(&total, 0.0, square, 1)).unwrap_err();
    assert!(matches!(err, FieldError::GcrOutOfRange { .. }));

    let err = generate_field_layout(&layout_for(&total, 0.25, custom(0.6, 0.0, 0.0), 1));
    assert!(matches!(err, Err(FieldError::AspectRatioTooLow { .. })));

    let err = generate_field_layout(&layout_for(&total, 0.25, custom(5.0, 0.0, 0.0), 1));
    assert!(matches!(err, Err(FieldError::AspectRatioTooHigh { .. })));

    for rotation in [190.0, -1.0, 180.0] {
        let err = generate_field_layout(&layout_for(&total, 0.25, custom(1.0, 0.0, rotation), 1));
        assert!(matches!(err, Err(FieldError::RotationOutOfRange { .. })));
    }

    for offset in [1.1, 0.5, -0.6] {
        let err = generate_field_layout(&layout_for(&total, 0.25, custom(1.0, offset, 0.0), 1));
        assert!(matches!(err, Err(FieldError::OffsetOutOfRange { .. })));
    }

    let mut cfg = layout_for(&total, 0.25, square, 1);
    cfg.min_tracker_spacing = 1.0;
    let err = generate_field_layout(&cfg).unwrap_err();
    assert!(matches!(err, FieldError::MinSpacingImpossible { .. }));
    assert!(err.to_string().contains("L_min not physically possible"));

    let err = generate_field_layout(&layout_for(&total, 0.25, square, 0));
    assert_eq!(err.unwrap_err(), FieldError::InvalidNeighborOrder);
}

#[test]
fn presets_at_their_limits_are_feasible() {
    let total = field_rect();
    let hex = layout_for(&total, 0.4, LayoutPreset::HexagonalNS.params(), 4);
    assert_eq!(generate_field_layout(&hex).expect("feasible").len(), 80);
    let hex_ew = layout_for(&total, 0.4, LayoutPreset::HexagonalEW.params(), 2);
    assert!(generate_field_layout(&hex_ew).is_ok());
    let diag = layout_for(&total, 0.1, LayoutPreset::Diagonal.params(), 1);
    assert!(generate_field_layout(&diag).is_ok());
}

#[test]
fn preset_names_round_trip_through_from_str() {
    for p in LayoutPreset::ALL {
        assert_eq!(p.name().parse::<LayoutPreset>(), Ok(p));
        assert_eq!(p.to_string(), p.name());
    }
    assert_eq!(
        "hexagonal".parse::<LayoutPreset>(),
        Err(FieldError::UnknownLayoutPreset {
            name: "hexagonal".into()
        })
    );
}

#[test]
fn gcr_max_of_reference_rectangle() {
    assert!((gcr_max(8.0, 20f64.sqrt(), 0.0) - 0.4).abs() < 1e-12);
}

#[test]
fn compass_bearing_quadrants() {
    assert_eq!(compass_bearing(0.0, 1.0), 0.0);
    assert!((compass_bearing(1.0, 0.0) - 90.0).abs() < 1e-12);
    assert!((compass_bearing(0.0, -1.0) - 180.0).abs() < 1e-12);
    assert!((compass_bearing(-1.0, 0.0) - 270.0).abs() < 1e-12);
    assert!((compass_bearing(-1.0, 1.0) - 315.0).abs() < 1e-12);
}

#[test]
fn max_shading_elevation_rectangle() {
    let total = field_rect();
    let set = generate_field_layout(&square(0.125)).expect("feasible");
    let m = max_shading_elevation(&total, set.as_slice());
    assert!((m - 16.77865488).abs() < TOL, "{m}");
}

#[test]
fn max_shading_elevation_circle() {
    let total = regular_polygon(0.0, 0.0, 2.0, 64);
    let cfg = layout_for(&total, 0.5, LayoutPreset::Square.params(), 2);
    let set = generate_field_layout(&cfg).expect("feasible");
    let m = max_shading_elevation(&total, set.as_slice());
    assert!((m - 52.989564).abs() < TOL, "{m}");
}

#[test]
fn max_shading_elevation_without_neighbors_is_zenith() {
    assert_eq!(max_shading_elevation(&field_rect(), &[]), 90.0);
}

proptest! {
    #[test]
    fn count_matches_order(order in 1u32..6) {
        let mut cfg = square(0.2);
        cfg.neighbor_order = order;
        let set = generate_field_layout(&cfg).unwrap();
        prop_assert_eq!(set.len(), neighbor_count(order));
        prop_assert!(set.iter().all(|n| n.distance > 0.0));
        prop_assert!(set.iter().all(|n| (0.0..360.0).contains(&n.relative_azimuth)));
    }

    #[test]
    fn flat_ground_has_no_heights(gcr in 0.05f64..0.38, rotation in 0.0f64..180.0) {
        let cfg = layout_for(&field_rect(), gcr, custom(1.0, 0.0, rotation), 2);
        let set = generate_field_layout(&cfg).unwrap();
        prop_assert!(set.iter().all(|n| n.z == 0.0 && n.relative_slope == 0.0));
    }

    /// Mirroring a layout at the north-south axis is the same as rotating it
    /// to `180 − rotation` (for unsheared lattices).
    #[test]
    fn mirrored_rotation_mirrors_layout(
        gcr in 0.05f64..0.3,
        aspect in 1.0f64..1.3,
        rotation in 1.0f64..179.0,
    ) {
        let total = field_rect();
        let a = generate_field_layout(&layout_for(&total, gcr, custom(aspect, 0.0, rotation), 2)).unwrap();
        let b = generate_field_layout(&layout_for(&total, gcr, custom(aspect, 0.0, 180.0 - rotation), 2)).unwrap();
        for n in &a {
            let twin = b
                .iter()
                .find(|m| (m.x + n.x).abs() < 1e-9 && (m.y - n.y).abs() < 1e-9);
            prop_assert!(twin.is_some());
            if let Some(m) = twin {
                let mirrored = (360.0 - n.relative_azimuth).rem_euclid(360.0);
                let diff = (mirrored - m.relative_azimuth).rem_euclid(360.0);
                prop_assert!(diff < 1e-6 || diff > 360.0 - 1e-6);
            }
        }
    }

    #[test]
    fn max_shading_elevation_grows_with_gcr(g1 in 0.05f64..0.38, g2 in 0.05f64..0.38) {
        let (lo, hi) = if g1 <= g2 { (g1, g2) } else { (g2, g1) };
        let total = field_rect();
        let m_lo = max_shading_elevation(&total, generate_field_layout(&square(lo)).unwrap().as_slice());
        let m_hi = max_shading_elevation(&total, generate_field_layout(&square(hi)).unwrap().as_slice());
        prop_assert!(m_lo <= m_hi + 1e-9);
        prop_assert!((0.0..=90.0).contains(&m_lo));
    }
}
