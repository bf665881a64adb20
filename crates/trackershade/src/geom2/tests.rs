use super::*;
use crate::error::FieldError;
use geo::{Area, LineString, Polygon};
use nalgebra::vector;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn affine_compose_applies_right_operand_first() {
    let f = Affine2::scaling(2.0).compose(&Affine2::rotation_deg(90.0));
    let p = f.apply(vector![1.0, 0.0]);
    assert!(close(p.x, 0.0, 1e-12) && close(p.y, 2.0, 1e-12));

    let id = Affine2::identity().compose(&Affine2::rotation_deg(30.0));
    assert_eq!(id, Affine2::rotation_deg(30.0));
}

#[test]
fn sheared_lattice_reads_unstretched_index() {
    let p = Affine2::sheared_lattice(2.0, 0.5).apply(vector![1.0, 1.0]);
    assert!(close(p.x, 2.0, 1e-15));
    assert!(close(p.y, 1.5, 1e-15));
}

#[test]
fn min_spacing_of_rectangle_is_twice_half_diagonal() {
    let total = rectangle(-2.0, -1.0, 2.0, 1.0);
    assert!(close(min_tracker_spacing(&total), 20f64.sqrt(), 1e-12));
}

#[test]
fn min_spacing_of_circles() {
    let centered = regular_polygon(0.0, 0.0, 1.0, 64);
    assert!(close(min_tracker_spacing(&centered), 2.0, 1e-12));
    // Rotation axis on the rim: the far side is a full diameter away.
    let shifted = regular_polygon(0.0, 1.0, 1.0, 64);
    assert!(close(min_tracker_spacing(&shifted), 4.0, 1e-12));
}

#[test]
fn min_spacing_of_irregular_polygon() {
    let poly = Polygon::new(
        LineString::from(vec![(-1.0, -1.0), (3.0, 2.0), (4.0, 4.0), (1.0, 2.0)]),
        vec![],
    );
    assert!(close(min_tracker_spacing(&poly), 2.0 * 32f64.sqrt(), 1e-12));
}

#[test]
fn regular_polygon_area_matches_closed_form() {
    let n = 64usize;
    let poly = regular_polygon(0.0, 0.0, 2.0, n);
    let expected = 0.5 * n as f64 * 4.0 * (std::f64::consts::TAU / n as f64).sin();
    assert!(close(poly.unsigned_area(), expected, 1e-12));
}

#[test]
fn collector_caches_derived_quantities() {
    let total = rectangle(-2.0, -1.0, 2.0, 1.0);
    let active = multi([
        rectangle(-1.9, -0.9, -0.1, -0.1),
        rectangle(0.1, -0.9, 1.9, -0.1),
        rectangle(-1.9, 0.1, -0.1, 0.9),
        rectangle(0.1, 0.1, 1.9, 0.9),
    ]);
    let c = CollectorGeometry::new(total, active).expect("valid collector");
    assert!(close(c.total_area(), 8.0, 1e-12));
    assert!(close(c.active_area(), 4.0 * 1.8 * 0.8, 1e-12));
    assert!(close(c.min_tracker_spacing(), 20f64.sqrt(), 1e-12));
    assert!(close(c.bounds().width(), 4.0, 1e-15));
    assert!(close(c.bounds().height(), 2.0, 1e-15));
}

#[test]
fn whole_outline_may_be_active() {
    let c = CollectorGeometry::from_total(rectangle(-2.0, -1.0, 2.0, 1.0)).expect("valid");
    assert!(close(c.active_area(), c.total_area(), 1e-12));
}

#[test]
fn active_outside_total_is_rejected() {
    let total = rectangle(-2.0, -1.0, 2.0, 1.0);
    let active = multi([rectangle(-1.0, -1.0, 3.0, 1.0)]);
    assert_eq!(
        CollectorGeometry::new(total, active).unwrap_err(),
        FieldError::ActiveNotEnclosed
    );
}

#[test]
fn degenerate_outline_is_rejected() {
    let flat = Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]), vec![]);
    assert!(matches!(
        CollectorGeometry::from_total(flat),
        Err(FieldError::DegenerateGeometry { .. })
    ));
}
